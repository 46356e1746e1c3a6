use std::cell::Cell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui_retained::Error;
use ratatui_retained::Window;
use ratatui_retained::button::Button;
use ratatui_retained::color::ColorScheme;
use ratatui_retained::combo_box::ComboBox;
use ratatui_retained::event_source::EventSource;
use ratatui_retained::geometry::Rect;
use ratatui_retained::input::Event;
use ratatui_retained::input::KeyCode;
use ratatui_retained::panel::Panel;
use ratatui_retained::text::Text;
use ratatui_retained::window::State;

/// Replays a script; `None` entries are idle polls. Quits once the script runs out.
struct Script {
    events: VecDeque<Option<Event>>,
    polls: usize,
}

impl Script {
    fn new(events: impl IntoIterator<Item = Option<Event>>) -> Self {
        Self {
            events: events.into_iter().collect(),
            polls: 0,
        }
    }
}

impl EventSource for Script {
    fn poll(&mut self, _timeout: Duration) -> io::Result<Option<Event>> {
        self.polls += 1;
        Ok(self.events.pop_front().unwrap_or(Some(Event::Quit)))
    }
}

fn row(buf: &Buffer, y: u16) -> String {
    (buf.area.left()..buf.area.right())
        .map(|x| buf[(x, y)].symbol())
        .collect()
}

fn colors() -> ColorScheme {
    ColorScheme::new(&[0x202020, 0x808080, 0xFFFFFF, 0x4060A0])
}

#[test]
fn zero_sized_terminal_is_rejected_before_any_event() {
    let mut terminal = Terminal::new(TestBackend::new(0, 0)).expect("terminal");
    let mut window = Window::new();
    let mut script = Script::new([Some(Event::click(0, 0))]);

    let res = window.run(&mut terminal, &mut script);
    assert!(matches!(
        res,
        Err(Error::InvalidSurface {
            width: 0,
            height: 0
        })
    ));
    assert_eq!(window.state(), State::Exit);
    assert_eq!(script.polls, 0);
}

#[test]
fn click_reaches_nested_button_and_frame_is_repainted() {
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();

    let mut panel: Panel = Panel::with_colors(Rect::new(0, 0, 20, 5), colors());
    panel.add_component(Box::new(Text::new(
        Rect::new(1, 1, 18, 1),
        "hello",
        0xFFFFFF,
    )));
    panel.add_component(Box::new(
        Button::new(Rect::new(2, 3, 4, 1), "ok", colors())
            .on_click(move || counter.set(counter.get() + 1)),
    ));

    let mut window = Window::new();
    window.add_component("main", Box::new(panel));

    let mut terminal = Terminal::new(TestBackend::new(24, 6)).expect("terminal");
    let mut script = Script::new([None, Some(Event::click(3, 3)), None]);
    window.run(&mut terminal, &mut script).expect("run");

    assert_eq!(hits.get(), 1);
    assert_eq!(window.state(), State::Exit);
    let buf = terminal.backend().buffer();
    assert!(row(buf, 1).contains("hello"), "{:?}", row(buf, 1));
    assert!(row(buf, 3).contains("ok"), "{:?}", row(buf, 3));
}

#[test]
fn combo_selection_is_painted() {
    let combo = ComboBox::new(Rect::new(0, 0, 8, 1), colors(), ["red", "green", "blue"], 3);
    let mut window = Window::new();
    window.add_component("combo", Box::new(combo));

    let mut terminal = Terminal::new(TestBackend::new(20, 6)).expect("terminal");
    let mut script = Script::new([
        Some(Event::click(1, 0)),
        None,
        Some(Event::click(1, 2)),
        None,
    ]);
    window.run(&mut terminal, &mut script).expect("run");

    let buf = terminal.backend().buffer();
    assert!(row(buf, 0).contains("green"), "{:?}", row(buf, 0));
    assert!(!row(buf, 2).contains("green"));
}

#[test]
fn escape_stops_the_loop_before_later_events() {
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    let mut window = Window::new();
    window.add_component(
        "b",
        Box::new(
            Button::new(Rect::new(0, 0, 3, 1), "x", colors())
                .on_click(move || counter.set(counter.get() + 1)),
        ),
    );

    let mut terminal = Terminal::new(TestBackend::new(10, 2)).expect("terminal");
    let mut script = Script::new([
        Some(Event::key(KeyCode::Esc)),
        Some(Event::click(1, 0)),
    ]);
    window.run(&mut terminal, &mut script).expect("run");

    assert_eq!(hits.get(), 0);
    assert_eq!(script.polls, 1);
}
