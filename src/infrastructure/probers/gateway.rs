use std::net::IpAddr;
use std::time::Duration;

/// Look up the default gateway with the platform's routing tool.
pub async fn detect_gateway(deadline: Duration) -> Option<String> {
    let (program, args): (&str, &[&str]) = if cfg!(windows) {
        ("ipconfig", &[])
    } else if cfg!(target_os = "macos") {
        ("route", &["-n", "get", "default"])
    } else {
        ("ip", &["route", "show", "default"])
    };

    let run = tokio::process::Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(deadline, run).await {
        Ok(Ok(output)) if output.status.success() => output,
        Ok(Ok(output)) => {
            tracing::debug!("{program} exited with {}", output.status);
            return None;
        }
        Ok(Err(e)) => {
            tracing::debug!("Failed to run {program}: {e}");
            return None;
        }
        Err(_) => {
            tracing::debug!("{program} timed out");
            return None;
        }
    };

    let text = String::from_utf8_lossy(&output.stdout);
    if cfg!(windows) {
        parse_ipconfig(&text)
    } else if cfg!(target_os = "macos") {
        parse_route_get(&text)
    } else {
        parse_ip_route(&text)
    }
}

/// `default via 192.168.1.1 dev wlan0 proto dhcp metric 600`
#[must_use]
pub fn parse_ip_route(output: &str) -> Option<String> {
    output
        .lines()
        .filter(|line| line.trim_start().starts_with("default"))
        .find_map(|line| {
            let mut tokens = line.split_whitespace();
            tokens.find(|t| *t == "via")?;
            tokens.next().filter(|t| is_ip(t)).map(str::to_string)
        })
}

/// `   gateway: 192.168.1.1`
#[must_use]
pub fn parse_route_get(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (key, value) = line.trim().split_once(':')?;
        (key.trim() == "gateway" && is_ip(value.trim())).then(|| value.trim().to_string())
    })
}

/// `Default Gateway . . . . . . . . . : 192.168.1.1`; the address may sit on
/// the following line when an IPv6 gateway is listed first.
#[must_use]
pub fn parse_ipconfig(output: &str) -> Option<String> {
    let lines: Vec<&str> = output.lines().collect();
    lines.iter().enumerate().find_map(|(i, line)| {
        if !line.contains("Default Gateway") {
            return None;
        }
        let candidates = std::iter::once(line.rsplit(" : ").next().unwrap_or(""))
            .chain(lines.get(i + 1).map(|next| next.trim()));
        candidates
            .map(str::trim)
            .find(|c| c.parse::<std::net::Ipv4Addr>().is_ok())
            .map(str::to_string)
    })
}

fn is_ip(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}
