mod frontmatter;
mod state;
mod welcome_notes;

pub use frontmatter::Frontmatter;
pub use state::*;
