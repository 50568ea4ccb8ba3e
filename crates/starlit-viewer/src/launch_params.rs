//! Launch configuration.
//!
//! On native the dataset location comes from the command line; on WASM it
//! is a relative URL fetched from the hosting page's origin.

use bevy::prelude::*;

/// Default dataset location relative to the working directory (native) or
/// page origin (WASM).
const DEFAULT_DATASET: &str = "data/papers.json";

/// Where to load the paper catalog from.
#[derive(Resource, Debug, Clone)]
pub struct LaunchParams {
    /// File path on native, relative URL on WASM.
    pub dataset: String,
}

impl LaunchParams {
    /// Read launch parameters from the process environment.
    #[cfg(not(target_family = "wasm"))]
    pub fn from_environment() -> Self {
        use clap::Parser;

        /// 3D paper-galaxy explorer.
        #[derive(Parser)]
        #[command(version, about)]
        struct Args {
            /// Path to the paper catalog JSON file.
            #[arg(long, default_value = DEFAULT_DATASET)]
            dataset: String,
        }

        let args = Args::parse();
        Self {
            dataset: args.dataset,
        }
    }

    /// WASM has no command line; always fetch the default URL.
    #[cfg(target_family = "wasm")]
    pub fn from_environment() -> Self {
        Self {
            dataset: DEFAULT_DATASET.to_string(),
        }
    }
}
