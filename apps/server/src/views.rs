//! Server-rendered HTML for the dashboard and monitor pages.

use chrono::{DateTime, Utc};
use pulse::{CHECK_INTERVAL, CheckStatus, MonitorSnapshot, MonitorStatus};

const PAGE_REFRESH_SECS: u64 = 30;

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 40px; background-color: #f5f5f5; }
        .container { max-width: 960px; margin: 0 auto; background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .status-card { color: white; padding: 20px; border-radius: 8px; text-align: center; margin-bottom: 20px; }
        .status-card h1 { margin: 0; }
        .status-card p { margin: 10px 0 0 0; opacity: 0.9; }
        .badge { color: white; padding: 4px 10px; border-radius: 12px; font-weight: bold; }
        .refresh-btn { background-color: #007bff; color: white; border: none; padding: 10px 20px; border-radius: 5px; cursor: pointer; font-size: 16px; margin: 10px 0; }
        .refresh-btn:hover { background-color: #0056b3; }
        .refresh-btn:disabled { background-color: #6c757d; cursor: not-allowed; }
        .loading { display: none; font-weight: bold; }
        table { width: 100%; border-collapse: collapse; margin-top: 20px; }
        th { background-color: #343a40; color: white; padding: 12px; text-align: left; }
        td { padding: 12px; border-bottom: 1px solid #dee2e6; }
        a { color: #007bff; }
        .info { color: #6c757d; font-size: 0.9em; margin-top: 20px; }
"#;

/// Escape text for use inside HTML element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn status_color(status: MonitorStatus) -> &'static str {
    match status {
        MonitorStatus::Up => "#28a745",
        MonitorStatus::Down => "#dc3545",
        MonitorStatus::Unknown => "#6c757d",
    }
}

fn row_color(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Up => "#d4edda",
        CheckStatus::Down => "#f8d7da",
    }
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Never".to_string())
}

fn page(title: &str, body: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta http-equiv="refresh" content="{PAGE_REFRESH_SECS}">
    <title>{title}</title>
    <style>{STYLE}</style>{script}
</head>
<body>
    <div class="container">
{body}
    </div>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Overview of every monitor in registry order
pub fn dashboard(snapshots: &[MonitorSnapshot]) -> String {
    let rows: String = snapshots
        .iter()
        .map(|s| {
            format!(
                r#"            <tr>
                <td><a href="/{key}">{name}</a></td>
                <td>{url}</td>
                <td><span class="badge" style="background-color: {color};">{status}</span></td>
                <td>{last_check}</td>
                <td>{count}</td>
            </tr>
"#,
                key = escape(&s.key),
                name = escape(&s.name),
                url = escape(&s.url),
                color = status_color(s.current_status),
                status = s.current_status,
                last_check = format_time(s.last_check),
                count = s.history.len(),
            )
        })
        .collect();

    let body = format!(
        r#"        <h1>Health Monitor</h1>
        <table>
            <thead>
                <tr><th>Monitor</th><th>Target</th><th>Status</th><th>Last checked</th><th>Checks kept</th></tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>
        <div class="info">
            <p><strong>Check Interval:</strong> Every {interval} seconds</p>
            <p><strong>Auto-refresh:</strong> This page refreshes every {PAGE_REFRESH_SECS} seconds</p>
        </div>"#,
        interval = CHECK_INTERVAL.as_secs(),
    );

    page("Health Monitor", &body, "")
}

/// Detail page of one monitor, history newest first
pub fn monitor_page(snapshot: &MonitorSnapshot) -> String {
    let key = escape(&snapshot.key);

    let rows: String = snapshot
        .history_newest_first()
        .map(|record| {
            format!(
                r#"                <tr style="background-color: {color};"><td>{time}</td><td>{status}</td></tr>
"#,
                color = row_color(record.status),
                time = format_time(Some(record.timestamp)),
                status = record.status,
            )
        })
        .collect();

    let script = format!(
        r#"
    <script>
        function triggerHealthCheck() {{
            const button = document.getElementById('refreshBtn');
            const loading = document.getElementById('loading');
            button.disabled = true;
            button.textContent = 'Checking...';
            loading.style.display = 'block';

            fetch('/{key}/trigger', {{ method: 'POST', headers: {{ 'Content-Type': 'application/json' }} }})
                .then(response => {{
                    if (response.ok) {{
                        window.location.reload();
                    }} else {{
                        reset(button, loading);
                        alert('Failed to trigger health check');
                    }}
                }})
                .catch(error => {{
                    reset(button, loading);
                    alert('Error: ' + error.message);
                }});
        }}

        function reset(button, loading) {{
            button.disabled = false;
            button.textContent = 'Manual Health Check';
            loading.style.display = 'none';
        }}
    </script>"#
    );

    let body = format!(
        r#"        <p><a href="/">&larr; All monitors</a></p>
        <div class="status-card" style="background-color: {color};">
            <h1>{name}: {status}</h1>
            <p>Last checked: {last_check}</p>
            <button id="refreshBtn" class="refresh-btn" onclick="triggerHealthCheck()">Manual Health Check</button>
            <div id="loading" class="loading">Performing health check...</div>
        </div>

        <h2>Health Check History</h2>
        <table>
            <thead>
                <tr><th>Timestamp</th><th>Status</th></tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>

        <div class="info">
            <p><strong>Monitoring:</strong> {url}</p>
            <p><strong>Check Interval:</strong> Every {interval} seconds</p>
            <p><strong>Auto-refresh:</strong> This page refreshes every {PAGE_REFRESH_SECS} seconds</p>
        </div>"#,
        color = status_color(snapshot.current_status),
        name = escape(&snapshot.name),
        status = snapshot.current_status,
        last_check = format_time(snapshot.last_check),
        url = escape(&snapshot.url),
        interval = CHECK_INTERVAL.as_secs(),
    );

    page(&snapshot.name, &body, &script)
}
