pub mod job_board;
pub mod phase_board;
pub mod post_feed;

pub use job_board::JobBoard;
pub use phase_board::{PHASES_PROVIDER, PhaseBoard};
pub use post_feed::PostFeed;
