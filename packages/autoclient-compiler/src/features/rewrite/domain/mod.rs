//! Rewrite domain models

mod call_site;
mod entry_point;

pub use call_site::CallSite;
pub use entry_point::EntryPoint;
