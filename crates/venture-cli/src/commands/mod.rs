pub mod checkpoint;
pub mod dispatch;
pub mod report;
pub mod selection;
pub mod serve;
pub mod session;
pub mod shared;
pub mod turn;
