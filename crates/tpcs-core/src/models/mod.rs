pub mod case;
pub mod cost;
pub mod token_count;
