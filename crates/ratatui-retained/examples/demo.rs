use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::rc::Rc;
use std::sync::Mutex;

use ratatui_retained::Window;
use ratatui_retained::button::Button;
use ratatui_retained::color::ColorScheme;
use ratatui_retained::color_select::ColorSelect;
use ratatui_retained::combo_box::ComboBox;
use ratatui_retained::component::Component;
use ratatui_retained::dropdown::Dropdown;
use ratatui_retained::dropdown::DropdownFlags;
use ratatui_retained::event_source::CrosstermEvents;
use ratatui_retained::expandable::ExpandDir;
use ratatui_retained::geometry::Rect;
use ratatui_retained::panel::Panel;
use ratatui_retained::scroll::ScrollPanel;
use ratatui_retained::slider::Slider;
use ratatui_retained::terminal::TerminalSession;
use ratatui_retained::text::Text;
use ratatui_retained::text_input::TextInput;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "ratatui-retained-demo.log";

fn init_logging() -> io::Result<()> {
    let file = File::create(LOG_FILE)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn colors() -> ColorScheme {
    ColorScheme::new(&[0x1E1E2E, 0x7F849C, 0xCDD6F4, 0x45475A, 0x89B4FA])
}

fn main() -> io::Result<()> {
    init_logging()?;

    let status = Rc::new(RefCell::new(String::from("ready")));

    let mut panel: Panel = Panel::with_colors(Rect::new(0, 0, 60, 22), colors());
    panel.add_component(Box::new(Text::new(
        Rect::new(2, 1, 40, 1),
        "ratatui-retained demo (Esc quits)",
        0xCDD6F4,
    )));

    let log = status.clone();
    panel.add_component(Box::new(
        Button::new(Rect::new(2, 3, 10, 1), "press", colors())
            .on_click(move || *log.borrow_mut() = "button pressed".to_owned()),
    ));

    let log = status.clone();
    panel.add_component(Box::new(
        Slider::new(Rect::new(14, 3, 20, 1), 0, 100, 5, colors())
            .on_change(move |v| *log.borrow_mut() = format!("slider = {v}")),
    ));

    let log = status.clone();
    panel.add_component(Box::new(
        TextInput::new(Rect::new(36, 3, 20, 1), "edit me", colors())
            .on_confirm(move |s| *log.borrow_mut() = format!("input = {s}")),
    ));

    let mut list: ScrollPanel = ScrollPanel::with_colors(Rect::new(2, 6, 16, 4), colors(), 4);
    for fruit in ["apple", "banana", "cherry", "damson", "elder", "fig", "grape"] {
        list.add_component(Box::new(Text::new(Rect::new(0, 0, 14, 1), fruit, 0xCDD6F4)));
    }
    panel.add_component(Box::new(list));

    let log = status.clone();
    panel.add_component(Box::new(
        ComboBox::new(
            Rect::new(20, 6, 12, 1),
            colors(),
            ["small", "medium", "large", "huge"],
            3,
        )
        .on_change(move |i, s| *log.borrow_mut() = format!("combo = {i}:{s}")),
    ));

    let mut dropdown: Dropdown = Dropdown::new(
        Rect::new(34, 6, 12, 1),
        Rect::new(0, 0, 10, 1),
        "rows",
        DropdownFlags::all(),
        4,
        colors(),
        ExpandDir::Down,
    )
    .with_factory(|i| {
        Box::new(Text::new(Rect::default(), format!("row {i}"), 0xCDD6F4)) as Box<dyn Component>
    });
    for name in ["alpha", "beta", "gamma"] {
        dropdown.add_row(Box::new(Text::new(Rect::default(), name, 0xCDD6F4)));
    }
    panel.add_component(Box::new(dropdown));

    panel.add_component(Box::new(ColorSelect::new(
        Rect::new(2, 12, 12, 1),
        colors(),
        ExpandDir::Down,
    )));

    let mut window = Window::new();
    window.add_component("main", Box::new(panel));

    let mut session = TerminalSession::enter()?;
    let mut events = CrosstermEvents::new();
    let res = window.run(session.terminal_mut(), &mut events);
    drop(session);

    tracing::info!(last = %status.borrow(), "demo finished");
    res.map_err(|err| io::Error::other(err.to_string()))
}
