pub mod chromedriver;
pub mod droid;
pub mod gebied_resolver;
pub mod maps_scraper;

pub use chromedriver::*;
pub use droid::*;
pub use gebied_resolver::*;
pub use maps_scraper::*;
