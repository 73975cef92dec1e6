//! Builders turning rule inputs into location blocks

mod location;
mod redirect;
mod rewrite;

pub use location::generate_path_location;
pub use redirect::{generate_redirect, generate_redirects};
pub use rewrite::generate_rewrites;
