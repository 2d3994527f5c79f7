/// Photo-stack engine
///
/// Pure, GUI-independent pieces behind the stack view:
/// - `transform.rs` - stable per-photo tilt and offset derived from the path
/// - `aspect.rs` - aspect ratios from the manifest or discovered on load
/// - `navigation.rs` - cyclic current index and input-to-step mapping
/// - `compositor.rs` - visible window, sizes, shadows and paint order
/// - `transition.rs` - enter/exit choreography of the top card
///
/// The canvas in `ui::stack_canvas` only paints what these produce.

pub mod aspect;
pub mod compositor;
pub mod navigation;
pub mod transform;
pub mod transition;

pub use aspect::AspectRatioTable;
pub use compositor::StackWindow;
pub use navigation::{NavigationState, Navigator, Step};
pub use transform::TransformCache;
pub use transition::{CardStyle, Transition};
