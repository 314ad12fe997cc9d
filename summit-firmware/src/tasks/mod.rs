//! Embassy tasks

pub mod link_rx;
pub mod link_tx;

pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;
