mod app;
mod dispatcher;
