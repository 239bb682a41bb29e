use std::{collections::HashSet, fmt};

use crate::{
    data::{
        accessor::{Host, lock_host},
        control::Control,
    },
    error::{Error, Result},
};

/// One host module's controls, bound to its state object.
#[derive(Clone)]
pub struct Page {
    name: String,
    formatted_name: String,
    controls: Vec<Control>,
    host: Host,
    reset_enabled: bool,
}

impl Page {
    /// Build a page, rejecting value-bearing controls that share an
    /// accessor name (they would share one persisted entry) and controls
    /// bound to a type other than `host`'s.
    pub fn new(
        name: impl Into<String>,
        host: Host,
        controls: Vec<Control>,
        reset_enabled: bool,
    ) -> Result<Self> {
        let name = name.into();
        let mut seen = HashSet::new();
        for accessor in controls.iter().filter_map(Control::value_accessor) {
            if !seen.insert(accessor.name()) {
                return Err(Error::DuplicateAccessor {
                    page: name,
                    accessor: accessor.name().to_string(),
                });
            }
        }
        {
            let state = lock_host(&host);
            for control in &controls {
                control.check_host(&*state)?;
            }
        }

        Ok(Self {
            formatted_name: format_name(&name),
            name,
            controls,
            host,
            reset_enabled,
        })
    }

    /// Registered name; also the preference category name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name, derived once from [`name`](Page::name).
    pub fn formatted_name(&self) -> &str {
        &self.formatted_name
    }

    /// Controls in registration order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Whether the menu offers "Reset default settings" for this page.
    pub fn reset_enabled(&self) -> bool {
        self.reset_enabled
    }

    /// Value-bearing controls, in registration order.
    pub fn value_controls(&self) -> impl Iterator<Item = &Control> {
        self.controls
            .iter()
            .filter(|control| control.value_accessor().is_some())
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("name", &self.name)
            .field("controls", &self.controls)
            .field("reset_enabled", &self.reset_enabled)
            .finish_non_exhaustive()
    }
}

/// Insert a space before every uppercase character except the first.
///
/// ```
/// assert_eq!(modsettings::format_name("HelloWorld"), "Hello World");
/// ```
pub fn format_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::field;

    struct Host {
        volume: f32,
        muted: bool,
    }

    fn host() -> crate::Host {
        Arc::new(Mutex::new(Host {
            volume: 0.5,
            muted: false,
        }))
    }

    #[test]
    fn test_format_name() {
        assert_eq!(format_name("HelloWorld"), "Hello World");
        assert_eq!(format_name("hp"), "hp");
        assert_eq!(format_name(""), "");
        assert_eq!(format_name("ABC"), "A B C");
        assert_eq!(format_name("myHUD2"), "my H U D2");
    }

    #[test]
    fn test_formatted_name_is_derived() {
        let page = Page::new("AudioMixer", host(), vec![], true).unwrap();
        assert_eq!(page.name(), "AudioMixer");
        assert_eq!(page.formatted_name(), "Audio Mixer");
    }

    #[test]
    fn test_duplicate_accessor_rejected() {
        let controls = vec![
            Control::horizontal_slider(field!(Host, volume), 0.0, 1.0).unwrap(),
            Control::toggle(field!(Host, muted), "Muted").unwrap(),
            Control::vertical_slider(field!(Host, volume), 0.0, 1.0).unwrap(),
        ];
        let err = Page::new("Audio", host(), controls, true).unwrap_err();
        assert!(
            matches!(err, Error::DuplicateAccessor { ref page, ref accessor } if page == "Audio" && accessor == "volume")
        );
    }

    #[test]
    fn test_foreign_host_rejected() {
        struct Speaker {
            bass: f32,
        }

        let controls = vec![
            Control::toggle(field!(Host, muted), "Muted").unwrap(),
            Control::horizontal_slider(field!(Speaker, bass), 0.0, 1.0).unwrap(),
        ];
        let err = Page::new("Audio", host(), controls, true).unwrap_err();
        assert!(matches!(err, Error::HostMismatch { ref accessor, .. } if accessor == "bass"));

        let speaker: crate::Host = Arc::new(Mutex::new(Speaker { bass: 0.2 }));
        let controls = vec![Control::horizontal_slider(field!(Speaker, bass), 0.0, 1.0).unwrap()];
        assert!(Page::new("Speaker", speaker, controls, true).is_ok());
    }

    #[test]
    fn test_value_controls_skip_display_only() {
        let controls = vec![
            Control::label("Audio"),
            Control::spacing(10),
            Control::toggle(field!(Host, muted), "Muted").unwrap(),
        ];
        let page = Page::new("Audio", host(), controls, false).unwrap();
        assert_eq!(page.value_controls().count(), 1);
        assert!(!page.reset_enabled());
    }
}
