/// Thumbnail grid with a lightbox overlay
///
/// Clicking a thumbnail enlarges it; clicking the backdrop, the Close
/// button or pressing Escape closes it again.

use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, mouse_area, scrollable, stack, text};
use iced::{Alignment, Color, ContentFit, Element, Length};
use iced_aw::Wrap;
use std::path::Path;

use crate::loader;
use crate::state::data::ImageItem;
use crate::Message;

const THUMB_WIDTH: f32 = 200.0;
const THUMB_HEIGHT: f32 = 150.0;

/// Build the grid, with the lightbox on top when a photo is selected
pub fn view<'a>(items: &'a [ImageItem], selected: Option<&'a str>, site_root: &Path) -> Element<'a, Message> {
    if items.is_empty() {
        return container(text(crate::EMPTY_ALBUM).size(16))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    }

    let tiles: Vec<Element<'a, Message>> = items
        .iter()
        .map(|item| {
            button(
                image(Handle::from_path(loader::resolve_file(site_root, &item.path)))
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fixed(THUMB_WIDTH))
                    .height(Length::Fixed(THUMB_HEIGHT)),
            )
            .padding(0)
            .on_press(Message::OpenPhoto(item.path.clone()))
            .into()
        })
        .collect();

    let grid = scrollable(
        container(Wrap::with_elements(tiles).spacing(4.0).line_spacing(8.0))
            .padding(16)
            .width(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill);

    match selected {
        Some(path) => stack![grid, lightbox(path, site_root)].into(),
        None => grid.into(),
    }
}

/// Full-size overlay for the selected photo
fn lightbox<'a>(path: &'a str, site_root: &Path) -> Element<'a, Message> {
    let photo = mouse_area(
        image(Handle::from_path(loader::resolve_file(site_root, path)))
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    // Clicks on the photo itself must not reach the backdrop
    .on_press(Message::OpenPhoto(path.to_string()));

    let content = column![
        container(button(text("Close").size(14)).on_press(Message::ClosePhoto))
            .width(Length::Fill)
            .align_x(Alignment::End),
        photo,
    ]
    .spacing(12)
    .padding(16);

    mouse_area(
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.8).into()),
                ..container::Style::default()
            }),
    )
    .on_press(Message::ClosePhoto)
    .into()
}
