//! Dashboard page

use axum::{
    http::header,
    response::{Html, IntoResponse},
};

/// GET / - Bot status dashboard, never cached
pub async fn index() -> impl IntoResponse {
    (
        [
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        Html(DASHBOARD_HTML),
    )
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Bot Status</title>
<style>
  body { font-family: sans-serif; margin: 2rem; }
  table { border-collapse: collapse; width: 100%; }
  th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }
  .online { color: #1a7f37; } .offline { color: #666; }
  .restarted { color: #9a6700; } .failed { color: #cf222e; }
</style>
</head>
<body>
<h1>Bot Status <small id="total"></small></h1>
<table>
  <thead>
    <tr><th>Bot</th><th>Status</th><th>Owner</th><th>Device</th><th>Room</th><th>Heartbeat age</th><th>Last seen</th></tr>
  </thead>
  <tbody id="bots"></tbody>
</table>
<script>
  const cell = (v) => { const td = document.createElement("td"); td.textContent = v ?? ""; return td; };
  async function refresh() {
    const res = await fetch("/api/bots", { cache: "no-store" });
    const body = await res.json();
    document.getElementById("total").textContent = "(" + body.total + ")";
    const rows = document.getElementById("bots");
    rows.replaceChildren();
    for (const [name, bot] of Object.entries(body.bots)) {
      const tr = document.createElement("tr");
      const status = cell(bot.status);
      status.className = bot.status;
      tr.append(cell(name), status, cell(bot.owner), cell(bot.device_name ?? bot.device_type),
                cell(bot.room_id), cell(bot.heartbeat_age), cell(bot.last_seen));
      rows.append(tr);
    }
  }
  refresh();
  setInterval(refresh, 5000);
</script>
</body>
</html>
"#;
