use iced::advanced::image::Image;
use iced::mouse::{self, Cursor};
use iced::touch;
use iced::widget::canvas::{self, Frame, Path, Program, Stroke};
use iced::widget::image::Handle;
use iced::{Color, Degrees, Point, Rectangle, Renderer, Size, Theme, Vector};
use std::path::Path as FsPath;
use std::time::Instant;

use crate::loader;
use crate::stack::compositor::{self, BoxSize, PILE_MARGIN};
use crate::stack::{AspectRatioTable, CardStyle, NavigationState, StackWindow, Step, TransformCache, Transition};
use crate::state::data::ImageItem;
use crate::Message;

/// White paper border around every photo
const CARD_BORDER: f32 = 6.0;
/// Shadow opacity for a fully opaque card
const SHADOW_ALPHA: f32 = 0.14;

/// Canvas painting the photo pile
///
/// Geometry is recomputed from `bounds` on every draw, so the pile follows
/// the canvas box whenever it is resized, not only on navigation.
pub struct StackCanvas<'a> {
    pub items: &'a [ImageItem],
    pub state: NavigationState,
    pub aspect: &'a AspectRatioTable,
    pub transforms: &'a TransformCache,
    pub transition: Option<&'a Transition>,
    /// Time the transition is sampled at (last animation tick)
    pub now: Instant,
    pub site_root: &'a FsPath,
}

impl StackCanvas<'_> {
    fn handle(&self, item: &ImageItem) -> Handle {
        Handle::from_path(loader::resolve_file(self.site_root, &item.path))
    }
}

impl Program<Message> for StackCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let Some(window) = StackWindow::compute(self.items, self.state) else {
            return vec![frame.into_geometry()];
        };

        let container = BoxSize::observe(bounds.width, bounds.height);
        let layouts = compositor::compose(&window, self.aspect, self.transforms, container);
        let elapsed = self.transition.map(|t| (t, t.elapsed(self.now)));
        let center = frame.center();

        // Back to front
        for layout in &layouts {
            let style = match elapsed {
                Some((transition, elapsed)) if layout.is_top() && transition.incoming == layout.index => {
                    transition.enter_style(elapsed)
                }
                _ => CardStyle::resting(layout.transform),
            };

            let item = &self.items[layout.index];
            paint_card(&mut frame, center, layout.size, style, layout.shadow_depth, self.handle(item));
        }

        // The leaving card flies off above everything else
        if let Some((transition, elapsed)) = elapsed {
            if let (Some(style), Some(item)) = (transition.exit_style(elapsed), self.items.get(transition.outgoing)) {
                let size = compositor::fit_box(container.inset(PILE_MARGIN), self.aspect.resolve(item));
                paint_card(&mut frame, center, size, style, compositor::shadow_depth(0), self.handle(item));
            }
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        // A click or tap anywhere on the pile advances
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
            | canvas::Event::Touch(touch::Event::FingerPressed { .. })
                if cursor.is_over(bounds) =>
            {
                (canvas::event::Status::Captured, Some(Message::Navigate(Step::Advance)))
            }
            _ => (canvas::event::Status::Ignored, None),
        }
    }

    fn mouse_interaction(&self, _state: &Self::State, bounds: Rectangle, cursor: Cursor) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Paint one card centered on `center`, transformed by `style`
fn paint_card(frame: &mut Frame, center: Point, size: BoxSize, style: CardStyle, shadow_depth: f32, handle: Handle) {
    if style.opacity <= 0.0 {
        return;
    }

    frame.with_save(|frame| {
        frame.translate(Vector::new(center.x + style.offset_x, center.y + style.offset_y));
        frame.rotate(Degrees(style.rotation_degrees));
        frame.scale(style.scale);

        let photo = Rectangle::new(
            Point::new(-size.width / 2.0, -size.height / 2.0),
            Size::new(size.width, size.height),
        );
        let card = photo.expand(CARD_BORDER);

        // Drop shadow, deeper for cards further back
        frame.fill(
            &Path::rectangle(
                Point::new(card.x + shadow_depth * 0.25, card.y + shadow_depth),
                card.size(),
            ),
            Color::from_rgba(0.16, 0.12, 0.08, SHADOW_ALPHA * style.opacity),
        );

        // Soft halo standing in for a blur while the card exits
        let halo_steps = style.blur.ceil() as u32;
        for step in 1..=halo_steps {
            let spread = step as f32;
            let alpha = 0.08 * style.opacity * (1.0 - spread / (halo_steps as f32 + 1.0));
            frame.stroke(
                &Path::rectangle(
                    Point::new(card.x - spread, card.y - spread),
                    Size::new(card.width + 2.0 * spread, card.height + 2.0 * spread),
                ),
                Stroke::default()
                    .with_color(Color::from_rgba(1.0, 1.0, 1.0, alpha))
                    .with_width(1.0),
            );
        }

        frame.fill_rectangle(
            card.position(),
            card.size(),
            Color::from_rgba(1.0, 1.0, 1.0, style.opacity),
        );
        frame.draw_image(photo, Image::new(handle).opacity(style.opacity));
    });
}
