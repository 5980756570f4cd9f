mod computed;
mod parser;
mod query;
mod stylesheet;

#[cfg(test)]
mod tests;

pub use computed::ComputedStyle;
pub use query::StyleQuery;
pub use stylesheet::Stylesheet;
