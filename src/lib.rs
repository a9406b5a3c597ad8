#![allow(dead_code)]

pub mod engine;
pub mod protocol;
pub mod relay;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;

        pub use std::collections::{BTreeSet, HashMap, HashSet};
    }
}

pub mod prelude {
    pub use super::engine::prelude::*;
    pub use super::protocol::Message;
    pub use super::relay::{Relay, RelayOptions};
    pub use super::utils::prelude::*;
}
