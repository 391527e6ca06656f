pub mod group;
pub mod remark;
