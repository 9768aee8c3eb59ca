mod concrete;
mod laws;
mod special;
