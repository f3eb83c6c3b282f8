use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryProtocol {
    Grpc,
    HttpProtobuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub endpoint: String,
    pub protocol: TelemetryProtocol,
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
    pub json_logs: bool,
    pub enabled: bool,
}

impl TelemetryConfig {
    pub fn from_env(default_service_name: &str, default_service_version: &str) -> Self {
        Self::from_lookup(default_service_name, default_service_version, |key| {
            env::var(key).ok()
        })
    }

    pub fn from_lookup<F>(
        default_service_name: &str,
        default_service_version: &str,
        lookup: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or_default();
        let protocol = lookup("OTEL_EXPORTER_OTLP_PROTOCOL")
            .map(|v| match v.to_lowercase().as_str() {
                "http" | "http/protobuf" => TelemetryProtocol::HttpProtobuf,
                _ => TelemetryProtocol::Grpc,
            })
            .unwrap_or(TelemetryProtocol::Grpc);
        let service_name =
            lookup("OTEL_SERVICE_NAME").unwrap_or_else(|| default_service_name.to_string());
        let service_version =
            lookup("OTEL_SERVICE_VERSION").unwrap_or_else(|| default_service_version.to_string());
        let environment = lookup("OTEL_RESOURCE_ATTRIBUTES")
            .and_then(parse_environment_from_resource)
            .or_else(|| lookup("DEPLOYMENT_ENV"))
            .unwrap_or_else(|| "ci".into());
        // CI logs are read by people, so plain text unless asked otherwise.
        let json_logs = lookup("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let enabled_flag = lookup("ENABLE_OTEL")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        let enabled = enabled_flag && !endpoint.trim().is_empty();

        Self {
            endpoint,
            protocol,
            service_name,
            service_version,
            environment,
            json_logs,
            enabled,
        }
    }

    pub fn exporter_enabled(&self) -> bool {
        self.enabled && !self.endpoint.trim().is_empty()
    }
}

fn parse_environment_from_resource(value: String) -> Option<String> {
    for kv in value.split(',') {
        let mut parts = kv.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == "deployment.environment" {
            return Some(val.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> TelemetryConfig {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        TelemetryConfig::from_lookup("slack-notify", "0.1.0", |key| {
            map.get(key).map(|v| v.to_string())
        })
    }

    #[test]
    fn defaults_are_text_logs_without_export() {
        let cfg = config(&[]);
        assert_eq!(cfg.service_name, "slack-notify");
        assert_eq!(cfg.service_version, "0.1.0");
        assert_eq!(cfg.environment, "ci");
        assert_eq!(cfg.protocol, TelemetryProtocol::Grpc);
        assert!(!cfg.json_logs);
        assert!(!cfg.exporter_enabled());
    }

    #[test]
    fn exporter_needs_flag_and_endpoint() {
        assert!(!config(&[("ENABLE_OTEL", "true")]).exporter_enabled());
        assert!(!config(&[("OTEL_EXPORTER_OTLP_ENDPOINT", "http://otel:4317")]).exporter_enabled());

        let cfg = config(&[
            ("ENABLE_OTEL", "yes"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://otel:4318"),
            ("OTEL_EXPORTER_OTLP_PROTOCOL", "http/protobuf"),
        ]);
        assert!(cfg.exporter_enabled());
        assert_eq!(cfg.protocol, TelemetryProtocol::HttpProtobuf);
    }

    #[test]
    fn environment_prefers_resource_attributes() {
        let cfg = config(&[
            (
                "OTEL_RESOURCE_ATTRIBUTES",
                "team=platform,deployment.environment=prod",
            ),
            ("DEPLOYMENT_ENV", "staging"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(cfg.environment, "prod");
        assert!(cfg.json_logs);

        assert_eq!(config(&[("DEPLOYMENT_ENV", "staging")]).environment, "staging");
    }
}
