/// Stack compositor: which cards are visible, in what order, at what size
///
/// Everything here is derived from the navigation state and the manifest on
/// every frame. Nothing is cached between frames, so the drawn pile can never
/// disagree with the selected photo.

use crate::state::data::ImageItem;

use super::aspect::AspectRatioTable;
use super::navigation::NavigationState;
use super::transform::{CardTransform, TransformCache};

/// Visible cards: the current photo plus ten behind it
pub const STACK_SIZE: usize = 11;

/// Shadow depth of the top card, in pixels
pub const SHADOW_BASE: f32 = 4.0;
/// Extra shadow depth per stack position
pub const SHADOW_STEP: f32 = 1.5;

/// Space kept around the pile so tilted and offset cards stay in bounds
pub const PILE_MARGIN: f32 = 32.0;

/// Container size assumed when the real box cannot be measured
pub const FALLBACK_CONTAINER: BoxSize = BoxSize {
    width: 800.0,
    height: 600.0,
};

/// A width/height pair in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
}

impl BoxSize {
    #[cfg(test)]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size of the measured container box
    ///
    /// An unmeasured (zero, negative or non-finite) box degrades to
    /// `FALLBACK_CONTAINER` rather than producing degenerate cards.
    pub fn observe(width: f32, height: f32) -> Self {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Self { width, height }
        } else {
            FALLBACK_CONTAINER
        }
    }

    /// Shrink by `margin` on every side, never below one pixel
    pub fn inset(self, margin: f32) -> Self {
        Self {
            width: (self.width - 2.0 * margin).max(1.0),
            height: (self.height - 2.0 * margin).max(1.0),
        }
    }
}

/// Largest box of aspect `ratio` fitting inside `container`
pub fn fit_box(container: BoxSize, ratio: f32) -> BoxSize {
    BoxSize {
        width: container.width.min(container.height * ratio),
        height: container.height.min(container.width / ratio),
    }
}

/// Shadow depth for a stack position, strictly increasing with depth
pub fn shadow_depth(stack_position: usize) -> f32 {
    SHADOW_BASE + stack_position as f32 * SHADOW_STEP
}

/// Paint order: position 0 gets the highest z
pub fn z_index(stack_position: usize) -> usize {
    STACK_SIZE.saturating_sub(stack_position)
}

/// One photo in the visible window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackCard<'a> {
    /// Index into the manifest
    pub index: usize,
    /// 0 = top card
    pub stack_position: usize,
    pub item: &'a ImageItem,
}

/// The visible slice of the album, starting at the current photo
#[derive(Debug, Clone, PartialEq)]
pub struct StackWindow<'a> {
    cards: Vec<StackCard<'a>>,
}

impl<'a> StackWindow<'a> {
    /// Window of `min(STACK_SIZE, n)` cards, or `None` for an empty album
    pub fn compute(items: &'a [ImageItem], state: NavigationState) -> Option<Self> {
        Self::with_size(items, state, STACK_SIZE)
    }

    pub fn with_size(items: &'a [ImageItem], state: NavigationState, stack_size: usize) -> Option<Self> {
        let n = items.len();
        if n == 0 {
            return None;
        }

        let start = state.current_index % n;
        let cards = (0..stack_size.min(n))
            .map(|stack_position| {
                let index = (start + stack_position) % n;
                StackCard {
                    index,
                    stack_position,
                    item: &items[index],
                }
            })
            .collect();

        Some(Self { cards })
    }

    pub fn cards(&self) -> &[StackCard<'a>] {
        &self.cards
    }

    #[cfg(test)]
    pub fn top(&self) -> &StackCard<'a> {
        // compute() never builds an empty window
        &self.cards[0]
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Everything needed to paint one card
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub path: String,
    pub index: usize,
    pub stack_position: usize,
    pub z_index: usize,
    pub shadow_depth: f32,
    pub size: BoxSize,
    /// Resting transform: squared up for the top card, per-path otherwise
    pub transform: CardTransform,
}

impl CardLayout {
    pub fn is_top(&self) -> bool {
        self.stack_position == 0
    }
}

/// Lay out a window inside `container`, ordered back to front for painting
pub fn compose(
    window: &StackWindow<'_>,
    aspect: &AspectRatioTable,
    transforms: &TransformCache,
    container: BoxSize,
) -> Vec<CardLayout> {
    let pile = container.inset(PILE_MARGIN);

    let mut layouts: Vec<CardLayout> = window
        .cards()
        .iter()
        .map(|card| {
            let transform = if card.stack_position == 0 {
                CardTransform::IDENTITY
            } else {
                transforms.get(&card.item.path)
            };

            CardLayout {
                path: card.item.path.clone(),
                index: card.index,
                stack_position: card.stack_position,
                z_index: z_index(card.stack_position),
                shadow_depth: shadow_depth(card.stack_position),
                size: fit_box(pile, aspect.resolve(card.item)),
                transform,
            }
        })
        .collect();

    layouts.sort_by_key(|layout| layout.z_index);
    layouts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(paths: &[&str]) -> Vec<ImageItem> {
        paths.iter().map(|p| ImageItem::new(*p)).collect()
    }

    fn at(current_index: usize) -> NavigationState {
        NavigationState {
            current_index,
            ..NavigationState::default()
        }
    }

    #[test]
    fn test_window_of_three() {
        let album = items(&["/a.jpg", "/b.jpg", "/c.jpg"]);
        let window = StackWindow::compute(&album, at(0)).unwrap();

        let mapped: Vec<(usize, &str)> = window
            .cards()
            .iter()
            .map(|c| (c.stack_position, c.item.path.as_str()))
            .collect();
        assert_eq!(mapped, vec![(0, "/a.jpg"), (1, "/b.jpg"), (2, "/c.jpg")]);
    }

    #[test]
    fn test_window_wraps_around() {
        let album = items(&["/a.jpg", "/b.jpg", "/c.jpg"]);
        let window = StackWindow::compute(&album, at(2)).unwrap();
        let indices: Vec<usize> = window.cards().iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![2, 0, 1]);
        assert_eq!(window.top().item.path, "/c.jpg");
    }

    #[test]
    fn test_window_length() {
        assert!(StackWindow::compute(&[], at(0)).is_none());

        for n in 1..=25 {
            let album: Vec<ImageItem> = (0..n).map(|i| ImageItem::new(format!("/{}.jpg", i))).collect();
            let window = StackWindow::compute(&album, at(n / 2)).unwrap();
            assert_eq!(window.len(), STACK_SIZE.min(n));
        }
    }

    #[test]
    fn test_fit_box_landscape_and_portrait() {
        let container = BoxSize::new(800.0, 600.0);

        assert_eq!(fit_box(container, 2.0), BoxSize::new(800.0, 400.0));
        assert_eq!(fit_box(container, 0.5), BoxSize::new(300.0, 600.0));
        assert_eq!(fit_box(container, 1.0), BoxSize::new(600.0, 600.0));
    }

    #[test]
    fn test_fit_box_preserves_ratio() {
        let container = BoxSize::new(640.0, 480.0);
        for ratio in [0.25_f32, 0.75, 1.0, 1.5, 3.0] {
            let size = fit_box(container, ratio);
            assert!(size.width <= container.width && size.height <= container.height);
            assert!((size.width / size.height - ratio).abs() < 1e-4);
        }
    }

    #[test]
    fn test_observe_falls_back_when_unmeasured() {
        assert_eq!(BoxSize::observe(0.0, 0.0), FALLBACK_CONTAINER);
        assert_eq!(BoxSize::observe(f32::NAN, 300.0), FALLBACK_CONTAINER);
        assert_eq!(BoxSize::observe(1024.0, 768.0), BoxSize::new(1024.0, 768.0));
    }

    #[test]
    fn test_shadow_and_z_order() {
        for pos in 1..STACK_SIZE {
            assert!(shadow_depth(pos) > shadow_depth(pos - 1));
            assert_eq!(shadow_depth(pos) - shadow_depth(pos - 1), SHADOW_STEP);
            assert!(z_index(pos) < z_index(pos - 1));
        }
    }

    #[test]
    fn test_compose_orders_back_to_front() {
        let album = items(&["/a.jpg", "/b.jpg", "/c.jpg", "/d.jpg"]);
        let window = StackWindow::compute(&album, at(1)).unwrap();
        let layouts = compose(
            &window,
            &AspectRatioTable::new(),
            &TransformCache::for_items(&album),
            BoxSize::new(800.0, 600.0),
        );

        let positions: Vec<usize> = layouts.iter().map(|l| l.stack_position).collect();
        assert_eq!(positions, vec![3, 2, 1, 0]);

        let top = layouts.last().unwrap();
        assert!(top.is_top());
        assert_eq!(top.path, "/b.jpg");
        assert_eq!(top.transform, CardTransform::IDENTITY);
    }

    #[test]
    fn test_compose_uses_resolved_ratios() {
        let album = vec![
            ImageItem::with_dimensions("/wide.jpg", 1600, 800),
            ImageItem::new("/unknown.jpg"),
        ];
        let window = StackWindow::compute(&album, at(0)).unwrap();
        let container = BoxSize::new(800.0 + 2.0 * PILE_MARGIN, 600.0 + 2.0 * PILE_MARGIN);
        let layouts = compose(&window, &AspectRatioTable::new(), &TransformCache::for_items(&album), container);

        let wide = layouts.iter().find(|l| l.path == "/wide.jpg").unwrap();
        assert_eq!(wide.size, BoxSize::new(800.0, 400.0));

        let unknown = layouts.iter().find(|l| l.path == "/unknown.jpg").unwrap();
        assert_eq!(unknown.size, BoxSize::new(600.0, 600.0));
        assert_eq!(unknown.transform, TransformCache::default().get("/unknown.jpg"));
    }
}
