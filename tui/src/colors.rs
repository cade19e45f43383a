use folio_core::history::LineClass;
use ratatui::style::Color;

pub(crate) fn text() -> Color {
    Color::Reset
}

pub(crate) fn prompt() -> Color {
    Color::LightGreen
}

pub(crate) fn link() -> Color {
    Color::LightBlue
}

pub(crate) fn error() -> Color {
    Color::LightRed
}

pub(crate) fn skill() -> Color {
    Color::LightYellow
}

pub(crate) fn banner() -> Color {
    Color::Cyan
}

pub(crate) fn for_class(class: LineClass) -> Color {
    match class {
        LineClass::Skill => skill(),
        LineClass::Error => error(),
        LineClass::Banner => banner(),
    }
}
