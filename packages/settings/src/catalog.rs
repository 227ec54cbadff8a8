// ABOUTME: Catalog of the live settings the engine recognizes
// ABOUTME: Names, descriptions, secret flags, and which settings must have a check

/// Well-known setting names
pub mod names {
    pub const EMAIL_HOST: &str = "EMAIL_HOST";
    pub const EMAIL_PORT: &str = "EMAIL_PORT";
    pub const EMAIL_HOST_USER: &str = "EMAIL_HOST_USER";
    pub const EMAIL_HOST_PASSWORD: &str = "EMAIL_HOST_PASSWORD";
    pub const EMAIL_USE_TLS: &str = "EMAIL_USE_TLS";
    pub const EMAIL_FROM_ADDRESS: &str = "EMAIL_FROM_ADDRESS";
    pub const TWILIO_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
    pub const TWILIO_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
    pub const TWILIO_API_KEY_SID: &str = "TWILIO_API_KEY_SID";
    pub const TWILIO_API_KEY_SECRET: &str = "TWILIO_API_KEY_SECRET";
    pub const TWILIO_NUMBER: &str = "TWILIO_NUMBER";
    pub const TWILIO_VERIFY_SERVICE_SID: &str = "TWILIO_VERIFY_SERVICE_SID";
    pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
    pub const TELEGRAM_WEBHOOK_HOST: &str = "TELEGRAM_WEBHOOK_HOST";
    pub const SLACK_CLIENT_OAUTH_ID: &str = "SLACK_CLIENT_OAUTH_ID";
    pub const SLACK_CLIENT_OAUTH_SECRET: &str = "SLACK_CLIENT_OAUTH_SECRET";
    pub const SLACK_SIGNING_SECRET: &str = "SLACK_SIGNING_SECRET";
    pub const SLACK_INSTALL_RETURN_REDIRECT_HOST: &str = "SLACK_INSTALL_RETURN_REDIRECT_HOST";
    pub const SEND_ANONYMOUS_USAGE_STATS: &str = "SEND_ANONYMOUS_USAGE_STATS";
    pub const GRAFANA_CLOUD_ONCALL_TOKEN: &str = "GRAFANA_CLOUD_ONCALL_TOKEN";
    pub const GRAFANA_CLOUD_ONCALL_HEARTBEAT_ENABLED: &str =
        "GRAFANA_CLOUD_ONCALL_HEARTBEAT_ENABLED";
    pub const GRAFANA_CLOUD_NOTIFICATIONS_ENABLED: &str = "GRAFANA_CLOUD_NOTIFICATIONS_ENABLED";
}

/// Whether a setting's value is checked before it is trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// A check must be registered for this setting
    Checked,
    /// Explicitly accepted as-is
    Unchecked,
}

#[derive(Debug, Clone)]
pub struct KnownSetting {
    pub name: &'static str,
    pub description: &'static str,
    pub is_secret: bool,
    pub validation: Validation,
}

impl KnownSetting {
    const fn checked(name: &'static str, description: &'static str, is_secret: bool) -> Self {
        Self {
            name,
            description,
            is_secret,
            validation: Validation::Checked,
        }
    }

    const fn unchecked(name: &'static str, description: &'static str, is_secret: bool) -> Self {
        Self {
            name,
            description,
            is_secret,
            validation: Validation::Unchecked,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingCatalog {
    settings: Vec<KnownSetting>,
}

impl SettingCatalog {
    pub fn new(settings: Vec<KnownSetting>) -> Self {
        Self { settings }
    }

    /// Names in catalog order
    pub fn names(&self) -> Vec<&'static str> {
        self.settings.iter().map(|s| s.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KnownSetting> {
        self.settings.iter()
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&KnownSetting> {
        self.settings
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn is_secret(&self, name: &str) -> bool {
        self.get(name).is_some_and(|s| s.is_secret)
    }
}

impl Default for SettingCatalog {
    fn default() -> Self {
        use names::*;

        Self::new(vec![
            KnownSetting::unchecked(
                EMAIL_HOST,
                "SMTP server host used to send email notifications.",
                false,
            ),
            KnownSetting::unchecked(EMAIL_PORT, "SMTP server port.", false),
            KnownSetting::unchecked(EMAIL_HOST_USER, "SMTP username.", false),
            KnownSetting::unchecked(EMAIL_HOST_PASSWORD, "SMTP password.", true),
            KnownSetting::unchecked(
                EMAIL_USE_TLS,
                "Use TLS when talking to the SMTP server.",
                false,
            ),
            KnownSetting::unchecked(
                EMAIL_FROM_ADDRESS,
                "Sender address for email notifications.",
                false,
            ),
            KnownSetting::checked(
                TWILIO_ACCOUNT_SID,
                "Twilio account SID used for phone calls and SMS.",
                false,
            ),
            KnownSetting::checked(
                TWILIO_AUTH_TOKEN,
                "Twilio auth token paired with the account SID.",
                true,
            ),
            KnownSetting::unchecked(
                TWILIO_API_KEY_SID,
                "Twilio API key SID, an alternative to the auth token.",
                false,
            ),
            KnownSetting::unchecked(TWILIO_API_KEY_SECRET, "Twilio API key secret.", true),
            KnownSetting::checked(
                TWILIO_NUMBER,
                "Phone number calls and SMS are sent from, in E.164 format.",
                false,
            ),
            KnownSetting::checked(
                TWILIO_VERIFY_SERVICE_SID,
                "Twilio Verify service SID used for phone number verification.",
                false,
            ),
            KnownSetting::checked(TELEGRAM_TOKEN, "Telegram bot token.", true),
            KnownSetting::checked(
                TELEGRAM_WEBHOOK_HOST,
                "Public host Telegram delivers bot updates to.",
                false,
            ),
            KnownSetting::unchecked(SLACK_CLIENT_OAUTH_ID, "Slack app OAuth client ID.", false),
            KnownSetting::unchecked(
                SLACK_CLIENT_OAUTH_SECRET,
                "Slack app OAuth client secret.",
                true,
            ),
            KnownSetting::unchecked(SLACK_SIGNING_SECRET, "Slack app signing secret.", true),
            KnownSetting::checked(
                SLACK_INSTALL_RETURN_REDIRECT_HOST,
                "Host users return to after installing the Slack app.",
                false,
            ),
            KnownSetting::unchecked(
                SEND_ANONYMOUS_USAGE_STATS,
                "Send anonymous usage statistics.",
                false,
            ),
            KnownSetting::checked(
                GRAFANA_CLOUD_ONCALL_TOKEN,
                "API token for Grafana Cloud OnCall.",
                true,
            ),
            KnownSetting::unchecked(
                GRAFANA_CLOUD_ONCALL_HEARTBEAT_ENABLED,
                "Send heartbeats to Grafana Cloud OnCall.",
                false,
            ),
            KnownSetting::unchecked(
                GRAFANA_CLOUD_NOTIFICATIONS_ENABLED,
                "Deliver SMS and phone notifications through Grafana Cloud.",
                false,
            ),
        ])
    }
}
