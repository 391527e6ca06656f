pub mod clash;

pub use clash::{
    ClashGeneral, ClashProfileDocument, ClashProxy, ClashProxyGroup, ProxyListDocument,
    RoutingPolicyDocument,
};
