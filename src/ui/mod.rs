pub mod frame;
pub mod panels;
pub mod plot;
