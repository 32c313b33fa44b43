use std::io::BufRead;
use std::sync::mpsc::Sender;
use log::warn;
use crate::core::Event;
use crate::inspection::PointerEvent;
use crate::rendering::ScreenPoint;

// Pointer input for the headless radar, one command per line:
//   move X Y | click X Y | close | quit

pub fn parse_command(line: &str) -> Option<Event> {
    let mut words = line.split_whitespace();
    let command = words.next()?.to_ascii_lowercase();

    let mut point = || -> Option<ScreenPoint> {
        let x = words.next()?.parse::<f64>().ok()?;
        let y = words.next()?.parse::<f64>().ok()?;
        Some(ScreenPoint::new(x, y))
    };

    match command.as_str() {
        "move" => point().map(|p| Event::Pointer(PointerEvent::Move(p))),
        "click" => point().map(|p| Event::Pointer(PointerEvent::Click(p))),
        "close" => Some(Event::Pointer(PointerEvent::Close)),
        "quit" | "exit" => Some(Event::Shutdown),
        _ => None
    }
}

/// Forwards commands until the input ends or the event loop goes away. End of input does not
/// stop the radar.
pub fn read_commands<R: BufRead>(input: R, out: Sender<Event>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => { warn!("Console input error: {}", e); break }
        };
        if line.trim().is_empty() { continue }

        match parse_command(&line) {
            Some(event) => if out.send(event).is_err() { break },
            None => warn!("Unrecognised command: {:?} (expected move X Y, click X Y, close or quit)", line.trim())
        }
    }
}
