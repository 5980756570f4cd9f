mod parser;
mod stylesheet;
