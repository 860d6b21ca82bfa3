//=========================================================================
// Core Systems
//
// Everything the driver and the scenes share, independent of any
// windowing backend.
//
// Modules:
// - `scene`: scene contract, lifecycle slots, registry and factory stores
// - `input`: portable input events, held-key state, quit filtering
// - `render`: drawing surface contract and the recording display list
// - `assets`: font/image handles and the filesystem asset store
// - `clock`: fixed-rate frame pacing
// - `platform_bridge`: the `Platform` contract and input channel draining
//
// Notes:
// Nothing here is global. The surface, asset loader and frame time are
// lent to the active scene for the duration of a call.
//
//=========================================================================

pub mod assets;
pub mod clock;
pub mod input;
pub mod platform_bridge;
pub mod render;
pub mod scene;
