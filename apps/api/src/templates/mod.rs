// Template library: canned prompt skeletons and their usage counters.

pub mod handlers;
