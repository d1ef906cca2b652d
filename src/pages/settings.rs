/// Local tuning knobs. Purely client-side state today; save only logs.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub alert_threshold: f64,
    pub auto_respond: bool,
    pub notifications_enabled: bool,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            alert_threshold: 0.7,
            auto_respond: true,
            notifications_enabled: true,
            dark_mode: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct SettingsPage {
    pub settings: Settings,
}

impl SettingsPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Threshold is a confidence fraction, clamped to 0..=1.
    pub fn set_alert_threshold(&mut self, value: f64) {
        self.settings.alert_threshold = value.clamp(0.0, 1.0);
    }

    pub fn toggle_auto_respond(&mut self) {
        self.settings.auto_respond = !self.settings.auto_respond;
    }

    pub fn toggle_notifications(&mut self) {
        self.settings.notifications_enabled = !self.settings.notifications_enabled;
    }

    pub fn save(&self) {
        tracing::info!("Settings saved: {:?}", self.settings);
    }

    /// Static response playbooks shown alongside the settings form.
    pub fn playbooks() -> &'static [(&'static str, &'static str)] {
        &[
            (
                "Ransomware Response",
                "Kill process, isolate host, alert security team",
            ),
            (
                "C2 Beaconing",
                "Block network, quarantine file, investigate",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_clamped() {
        let mut page = SettingsPage::new();
        page.set_alert_threshold(1.4);
        assert_eq!(page.settings.alert_threshold, 1.0);
        page.set_alert_threshold(-0.2);
        assert_eq!(page.settings.alert_threshold, 0.0);
        page.set_alert_threshold(0.5);
        assert_eq!(page.settings.alert_threshold, 0.5);
    }

    #[test]
    fn toggles_flip_state() {
        let mut page = SettingsPage::new();
        assert!(page.settings.auto_respond);
        page.toggle_auto_respond();
        assert!(!page.settings.auto_respond);
    }
}
