use sanic_platformer::{InputState, Key};

/// Held keys for a span of ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub ticks: u64,
    pub keys: Vec<Key>,
}

/// Looping script of key segments, e.g. `right*40,right+jump*2,idle*10`.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTrack {
    segments: Vec<Segment>,
    period: u64,
}

fn parse_key(name: &str) -> Option<Key> {
    match name {
        "left" => Some(Key::Left),
        "right" => Some(Key::Right),
        "up" => Some(Key::Up),
        "down" => Some(Key::Down),
        "jump" => Some(Key::Jump),
        "dash" => Some(Key::Dash),
        "attack" => Some(Key::Attack),
        _ => None,
    }
}

impl InputTrack {
    pub fn new(segments: Vec<Segment>) -> Self {
        let period = segments.iter().map(|s| s.ticks).sum();
        Self { segments, period }
    }

    /// Walk right, hop every second or so, dash and fire now and then.
    pub fn demo() -> Self {
        Self::new(vec![
            Segment {
                ticks: 45,
                keys: vec![Key::Right],
            },
            Segment {
                ticks: 2,
                keys: vec![Key::Right, Key::Jump],
            },
            Segment {
                ticks: 30,
                keys: vec![Key::Right],
            },
            Segment {
                ticks: 1,
                keys: vec![Key::Right, Key::Dash, Key::Attack],
            },
        ])
    }

    /// Parse `keys*ticks` segments separated by commas. Unknown keys and
    /// malformed counts are skipped with a warning.
    pub fn parse(script: &str) -> Self {
        let mut segments = Vec::new();
        for part in script.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (names, count) = part.split_once('*').unwrap_or((part, "1"));
            let Ok(ticks) = count.trim().parse::<u64>() else {
                tracing::warn!("Bad tick count in track segment {part:?}");
                continue;
            };
            let mut keys = Vec::new();
            for name in names.split('+').map(str::trim) {
                if name == "idle" {
                    continue;
                }
                match parse_key(name) {
                    Some(k) => keys.push(k),
                    None => tracing::warn!("Unknown key {name:?} in track"),
                }
            }
            segments.push(Segment { ticks, keys });
        }
        Self::new(segments)
    }

    pub fn input_at(&self, tick: u64) -> InputState {
        if self.period == 0 {
            return InputState::new();
        }
        let mut t = tick % self.period;
        for seg in &self.segments {
            if t < seg.ticks {
                return InputState::with_keys(&seg.keys);
            }
            t -= seg.ticks;
        }
        InputState::new()
    }
}
