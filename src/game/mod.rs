pub use keywords::KeywordPool;
pub use service::GameService;

mod keywords;
mod service;
