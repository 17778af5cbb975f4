use strum::EnumString;

/// Messages from background services to the UI thread. Each one can also be
/// sent as a line over the control socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AppEvent {
    Start,
    Stop,
    Toggle,
    Quit,
    #[strum(serialize = "reload")]
    ConfigReload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_socket_commands() {
        let cases = vec![
            ("start", AppEvent::Start),
            ("STOP", AppEvent::Stop),
            ("Toggle", AppEvent::Toggle),
            ("quit", AppEvent::Quit),
            ("reload", AppEvent::ConfigReload),
        ];

        for (line, expected) in cases {
            assert_eq!(AppEvent::from_str(line).unwrap(), expected);
        }
        assert!(AppEvent::from_str("configreload").is_err());
        assert!(AppEvent::from_str("spin").is_err());
    }
}
