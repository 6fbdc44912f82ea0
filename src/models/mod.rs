pub mod stock;
pub mod event;
pub mod watchlist;
pub mod market;
pub mod filter;
pub mod realtime;
pub mod response;

pub use stock::*;
pub use event::*;
pub use watchlist::*;
pub use market::*;
pub use filter::*;
pub use realtime::*;
pub use response::*;
