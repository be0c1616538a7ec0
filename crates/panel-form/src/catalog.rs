//! Built-in schema of the VPN agent configuration panel.

use crate::spec::{FieldGroup, FieldKind, FieldSpec, FormSchema};

const ABBREVIATIONS: &[&str] = &[
    "CF", "ID", "URL", "API", "IP", "DNS", "TCP", "TLS", "QUIC", "SSL", "WARP",
];

const INBOUNDS: &[&str] = &[
    "vless-tcp-tls-direct",
    "vless-hu-tls-direct",
    "vless-hu-tls-cdn",
    "vless-xhttp-quic-direct",
    "vless-xhttp-quic-cdn",
];

/// Turns an env key into a label: `CF_API_TOKEN` becomes `CF API Token`.
pub fn format_label(key: &str) -> String {
    key.split('_')
        .map(|part| {
            let upper = part.to_uppercase();
            if ABBREVIATIONS.contains(&upper.as_str()) {
                upper
            } else {
                capitalize(part)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn group(title: &str, fields: &[&str], advanced: bool) -> FieldGroup {
    FieldGroup {
        title: title.into(),
        fields: fields.iter().map(|name| name.to_string()).collect(),
        advanced,
    }
}

pub fn agent_panel() -> FormSchema {
    use FieldKind::{Checkbox, Password, Select, SelectCustom, Text, Toggle};

    let fields = vec![
        FieldSpec::new("METRIC_PUSH_METHOD", Select)
            .with_default("grafana_agent")
            .with_options(["grafana_agent", "pushgateway"])
            .with_comment("Metric push method. Recommended: Grafana Agent."),
        FieldSpec::new("GRAFANA_AGENT_REMOTE_WRITE_URL", Text)
            .with_placeholder("https://prometheus-prod-XXX-grafana.grafana.net/api/prom/push")
            .with_comment("Endpoint URL for Grafana metrics.")
            .shown_when("METRIC_PUSH_METHOD", "grafana_agent"),
        FieldSpec::new("GRAFANA_AGENT_REMOTE_WRITE_USER", Text)
            .with_placeholder("Your Grafana User ID")
            .with_comment("Username for Grafana metrics endpoint.")
            .shown_when("METRIC_PUSH_METHOD", "grafana_agent"),
        FieldSpec::new("GRAFANA_AGENT_REMOTE_WRITE_PASSWORD", Password)
            .with_placeholder("Your Grafana API Key (glc_...)")
            .with_comment("Password Key for Grafana metrics endpoint.")
            .shown_when("METRIC_PUSH_METHOD", "grafana_agent"),
        FieldSpec::new("PUSHGATEWAY_URL", Text)
            .with_placeholder("https://your-pushgateway-url:9091")
            .with_comment("URL of the Pushgateway server.")
            .shown_when("METRIC_PUSH_METHOD", "pushgateway"),
        FieldSpec::new("PUSHGATEWAY_AUTH_USER", Text)
            .with_placeholder("Pushgateway Username")
            .with_comment("Username for Pushgateway authentication.")
            .shown_when("METRIC_PUSH_METHOD", "pushgateway"),
        FieldSpec::new("PUSHGATEWAY_AUTH_PASSWORD", Password)
            .with_placeholder("Pushgateway Password")
            .with_comment("Password for Pushgateway authentication.")
            .shown_when("METRIC_PUSH_METHOD", "pushgateway"),
        FieldSpec::new("DONOR", Text)
            .with_placeholder("e.g., my-server-01")
            .with_comment("Identifier for this server instance in metrics."),
        FieldSpec::new("REDEPLOY_INTERVAL", Select)
            .with_default("1m")
            .with_options(["1h", "4h", "1d", "7d", "14d", "1m", "3m"])
            .with_comment("How often configurations are reset (e.g., 7d for weekly)."),
        FieldSpec::new("IPINFO_API_TOKEN", Password)
            .with_placeholder("Your IPInfo.io API Token")
            .with_comment("Token for IPInfo geolocation service."),
        FieldSpec::new("CF_ENABLE", Toggle)
            .with_default("true")
            .with_switch_values("true", "false")
            .with_comment("Enable Cloudflare CDN integration."),
        FieldSpec::new("CF_ONLY", Toggle)
            .with_default("false")
            .with_switch_values("true", "false")
            .with_comment(
                "Force all traffic through Cloudflare (use only if direct access is blocked).",
            )
            .shown_when("CF_ENABLE", "true"),
        FieldSpec::new("CF_API_TOKEN", Password)
            .with_placeholder("Your Cloudflare API Token")
            .with_comment("Cloudflare API token for managing DNS and SSL."),
        FieldSpec::new("CF_ZONE_ID", Text)
            .with_placeholder("Your Cloudflare Zone ID")
            .with_comment("Cloudflare Zone ID for your domain."),
        FieldSpec::new("CF_CLEAN_IP_DOMAIN", Text)
            .with_placeholder("e.g., npmjs.com or 104.17.223.1")
            .with_comment("Domain or IP used for CDN Config links."),
        FieldSpec::new("XRAY_OUTBOUND", Select)
            .with_default("direct")
            .with_options(["direct", "warp"])
            .with_comment(
                "How server's outbound connections are routed. 'warp' uses Cloudflare WARP.",
            ),
        FieldSpec::new("XRAY_INBOUNDS", Checkbox)
            .with_defaults(INBOUNDS.iter().copied())
            .with_options(INBOUNDS.iter().copied())
            .with_comment("Select the client connection methods to enable."),
        FieldSpec::new("SSL_PROVIDER", Select)
            .with_default("letsencrypt")
            .with_options(["letsencrypt", "zerossl"])
            .with_comment("Certificate Authority for SSL certificates."),
        FieldSpec::new("AUTO_UPDATE", Toggle)
            .with_default("on")
            .with_switch_values("on", "off")
            .with_comment("Enable automatic updates for the agent software."),
        FieldSpec::new("NGINX_PATH", Text)
            .with_default("compass")
            .with_placeholder("e.g., myvpnpath (no slashes)")
            .with_comment("Internal NGINX routing path for the VPN service."),
        FieldSpec::new("NGINX_FAKE_WEBSITE", Text)
            .with_default("www.google.com")
            .with_placeholder("e.g., www.bing.com")
            .with_comment("Website to proxy for obfuscation (must NOT be behind major CDN)."),
        FieldSpec::new("CUSTOM_DNS", SelectCustom)
            .with_default("controld")
            .with_options(["default", "cf", "controld"])
            .with_comment("DNS resolver for the server. Use preset or custom URL."),
        FieldSpec::new("DEBUG", Toggle)
            .with_default("disable")
            .with_switch_values("enable", "disable")
            .with_comment("Enable verbose logging for troubleshooting."),
    ];

    FormSchema {
        id: "agent-panel".into(),
        title: "Agent Configuration".into(),
        groups: vec![
            group(
                "Metrics Configuration",
                &[
                    "METRIC_PUSH_METHOD",
                    "GRAFANA_AGENT_REMOTE_WRITE_URL",
                    "GRAFANA_AGENT_REMOTE_WRITE_USER",
                    "GRAFANA_AGENT_REMOTE_WRITE_PASSWORD",
                    "PUSHGATEWAY_URL",
                    "PUSHGATEWAY_AUTH_USER",
                    "PUSHGATEWAY_AUTH_PASSWORD",
                ],
                false,
            ),
            group(
                "General Settings",
                &["DONOR", "REDEPLOY_INTERVAL", "IPINFO_API_TOKEN", "AUTO_UPDATE"],
                false,
            ),
            group(
                "Core Settings",
                &[
                    "XRAY_OUTBOUND",
                    "XRAY_INBOUNDS",
                    "NGINX_PATH",
                    "NGINX_FAKE_WEBSITE",
                ],
                false,
            ),
            group(
                "Cloudflare Integration",
                &[
                    "CF_API_TOKEN",
                    "CF_ZONE_ID",
                    "CF_ENABLE",
                    "CF_ONLY",
                    "CF_CLEAN_IP_DOMAIN",
                ],
                false,
            ),
            group(
                "System & Other Settings",
                &["SSL_PROVIDER", "CUSTOM_DNS", "DEBUG"],
                true,
            ),
        ],
        fields,
    }
}
