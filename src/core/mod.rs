// Domain-layer modules: the engine, free of HTTP concerns
pub mod codes {
    pub use crate::codes::*;
}

pub mod lead_id {
    pub use crate::lead_id::*;
}

pub mod sequence {
    pub use crate::sequence::*;
}

pub mod duplicate {
    pub use crate::duplicate::*;
}

pub mod models {
    pub use crate::models::*;
}
