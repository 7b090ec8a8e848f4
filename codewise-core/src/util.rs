use std::time::Duration;

pub const NET_CONNECT_TIMEOUT: Duration = Duration::from_millis(8 * 1000);

pub const NET_IO_TIMEOUT: Duration = Duration::from_millis(16 * 1000);

pub fn default_ureq_agent_builder(
    proxy_url: Option<&str>,
) -> ureq::config::ConfigBuilder<ureq::typestate::AgentScope> {
    let mut agent = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(30)))
        .timeout_connect(Some(NET_CONNECT_TIMEOUT))
        .timeout_recv_response(Some(NET_IO_TIMEOUT))
        .timeout_send_request(Some(NET_IO_TIMEOUT));

    if let Some(proxy_url) = proxy_url {
        match ureq::Proxy::new(proxy_url) {
            Ok(proxy) => agent = agent.proxy(Some(proxy)),
            Err(err) => log::error!("ignoring invalid proxy {:?}: {}", proxy_url, err),
        }
    }

    agent
}

/// Last `/`-separated segment of a resource name.
pub fn last_segment(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_of_resource_name() {
        assert_eq!(
            last_segment("projects/p/databases/(default)/documents/cursos/abc"),
            "abc"
        );
        assert_eq!(last_segment("abc"), "abc");
        assert_eq!(last_segment(""), "");
    }
}
