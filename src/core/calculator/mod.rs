pub mod auto_break;
pub mod expected;
pub mod paid_breaks;
pub mod surplus;
pub mod workday;
