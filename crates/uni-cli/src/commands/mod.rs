pub mod audit;
pub mod compare;
pub mod dispatch;
pub mod distill;
pub mod init;
pub mod merge;
pub mod project;
pub mod rule_type;
pub mod scheme;
pub mod shared;
