mod animation;
mod content;
