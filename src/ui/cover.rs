/// Album cover: title, cover photo, and a prompt to open the stack

use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, text};
use iced::{Alignment, Color, ContentFit, Element, Length};
use std::path::Path;

use crate::loader;
use crate::Message;

const COVER_PHOTO_WIDTH: f32 = 310.0;
const COVER_PHOTO_HEIGHT: f32 = 176.0;

pub fn view<'a>(title: &'a str, cover_photo: Option<&str>, site_root: &Path) -> Element<'a, Message> {
    let mut content = column![text(title).size(18)]
        .spacing(24)
        .align_x(Alignment::Center);

    if let Some(path) = cover_photo {
        content = content.push(
            container(
                image(Handle::from_path(loader::resolve_file(site_root, path)))
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fixed(COVER_PHOTO_WIDTH))
                    .height(Length::Fixed(COVER_PHOTO_HEIGHT)),
            )
            .padding(40)
            .style(|_theme| container::Style {
                background: Some(Color::from_rgb8(0xED, 0xDC, 0xBF).into()),
                ..container::Style::default()
            }),
        );
    }

    content = content.push(text("Click to open album").size(14));

    container(
        button(content)
            .on_press(Message::OpenAlbum)
            .style(button::text)
            .padding(24),
    )
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}
