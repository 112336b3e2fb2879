mod common;
mod draft;
mod projection;
