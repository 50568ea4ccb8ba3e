//! Unified async runtime abstraction for native and WASM platforms.
//!
//! Background work (the catalog load, citation lookups) is spawned through
//! one `TaskSpawner` `SystemParam` so the rest of the codebase never sees
//! a platform `#[cfg]`:
//! - Native: `bevy_tokio_tasks` provides a Tokio runtime (reqwest needs one)
//! - WASM: Bevy's built-in `AsyncComputeTaskPool` drives browser futures

use bevy::prelude::*;

/// Plugin that sets up the async runtime for the current platform.
///
/// On native this adds the Tokio runtime plugin; on WASM it is a no-op
/// since Bevy's task pool handles async execution.
pub struct AsyncRuntimePlugin;

impl Plugin for AsyncRuntimePlugin {
    fn build(&self, app: &mut App) {
        #[cfg(target_family = "wasm")]
        let _ = app;

        #[cfg(not(target_family = "wasm"))]
        app.add_plugins(bevy_tokio_tasks::TokioTasksPlugin::default());
    }
}

// Native implementation using Tokio.
#[cfg(not(target_family = "wasm"))]
mod native {
    use std::future::Future;

    use bevy::ecs::system::SystemParam;
    use bevy::prelude::*;

    /// A system parameter for spawning fire-and-forget background tasks.
    ///
    /// Tasks communicate results back to the main thread over channels
    /// (`async_channel`), polled by an `Update` system.
    #[derive(SystemParam)]
    pub struct TaskSpawner<'w, 's> {
        runtime: Res<'w, bevy_tokio_tasks::TokioTasksRuntime>,
        // Local<()> keeps the signature identical to the WASM variant.
        #[allow(dead_code)]
        _local: Local<'s, ()>,
    }

    impl TaskSpawner<'_, '_> {
        /// Spawn a background task that runs to completion.
        pub fn spawn<F>(&self, future: F)
        where
            F: Future<Output = ()> + Send + 'static,
        {
            self.runtime.spawn_background_task(move |_ctx| future);
        }
    }
}

// WASM implementation using Bevy's task pool.
#[cfg(target_family = "wasm")]
mod wasm {
    use std::future::Future;

    use bevy::ecs::system::SystemParam;
    use bevy::prelude::*;
    use bevy::tasks::AsyncComputeTaskPool;

    /// A system parameter for spawning fire-and-forget background tasks.
    ///
    /// Tasks communicate results back to the main thread over channels
    /// (`async_channel`), polled by an `Update` system. No `Send` bound:
    /// the browser is single-threaded.
    #[derive(SystemParam)]
    pub struct TaskSpawner<'w, 's> {
        // Local<()> is a no-op SystemParam that satisfies the derive.
        #[allow(dead_code)]
        _local: Local<'s, ()>,
        #[allow(dead_code)]
        _marker: std::marker::PhantomData<&'w ()>,
    }

    impl TaskSpawner<'_, '_> {
        /// Spawn a background task that runs to completion.
        pub fn spawn<F>(&self, future: F)
        where
            F: Future<Output = ()> + 'static,
        {
            AsyncComputeTaskPool::get().spawn_local(future).detach();
        }
    }
}

#[cfg(not(target_family = "wasm"))]
pub use native::TaskSpawner;
#[cfg(target_family = "wasm")]
pub use wasm::TaskSpawner;
