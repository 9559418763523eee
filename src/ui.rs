use crate::calendar::{month_grid, months_to_display};
use crate::config::AppConfig;
use crate::models::{CalendarDay, CalendarMonth, Notice};
use crate::stats::build_summary_at;
use crate::store::AttendanceStore;
use chrono::NaiveDateTime;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render_index(
    config: &AppConfig,
    store: &AttendanceStore,
    now: NaiveDateTime,
    notice: Option<Notice>,
) -> String {
    let today = now.date();
    let period = &config.period;
    let summary = build_summary_at(today, store, period);
    let repeat_allowed = config.allow_repeat_checkin_on == Some(today);

    let status = match store.record_for(today) {
        Some(time) => format!(r#"<span class="badge ok">Checked in ({time})</span>"#),
        None if !period.contains(today) => {
            r#"<span class="badge muted">Outside the period</span>"#.to_string()
        }
        None => r#"<span class="badge warn">Not checked in yet</span>"#.to_string(),
    };

    let mut banner = notice
        .map(|notice| render_notice(notice, store, now))
        .unwrap_or_default();
    if repeat_allowed {
        banner.push_str(&format!(
            r#"<div class="notice info">Repeat check-ins are enabled for {today} (testing mode).</div>"#
        ));
    }

    let disabled = if store.is_locked(today, config.allow_repeat_checkin_on) {
        "disabled"
    } else {
        ""
    };

    let calendars: String = months_to_display(today, period)
        .into_iter()
        .map(|month| render_month(&month_grid(month, today, store, period)))
        .collect();

    INDEX_HTML
        .replace("{{USER}}", &escape_html(&config.user_name))
        .replace("{{PERIOD_START}}", &period.start().to_string())
        .replace("{{PERIOD_END}}", &period.end().to_string())
        .replace("{{BANNER}}", &banner)
        .replace("{{DISABLED}}", disabled)
        .replace("{{STATUS}}", &status)
        .replace("{{PERCENT}}", &format!("{:.1}", summary.percentage))
        .replace("{{PROGRESS}}", &format!("{:.2}", summary.percentage.clamp(0.0, 100.0)))
        .replace("{{CHECKED}}", &summary.checked_days.to_string())
        .replace("{{TARGET}}", &summary.target_days.to_string())
        .replace("{{STREAK}}", &summary.streak.to_string())
        .replace("{{CALENDARS}}", &calendars)
        .replace("{{RECORD_COUNT}}", &store.len().to_string())
        .replace("{{RECORDS}}", &render_records(store))
}

fn render_notice(notice: Notice, store: &AttendanceStore, now: NaiveDateTime) -> String {
    let today = now.date();
    match notice {
        Notice::CheckedIn => {
            let time = store
                .record_for(today)
                .map(|time| time.to_string())
                .unwrap_or_default();
            format!(r#"<div class="notice ok">Checked in for {today} at {time}.</div>"#)
        }
        Notice::AlreadyCheckedIn => {
            r#"<div class="notice warn">You already checked in today. Try again after midnight.</div>"#
                .to_string()
        }
        Notice::OutOfPeriod => {
            r#"<div class="notice error">Check-ins are closed outside the attendance period.</div>"#
                .to_string()
        }
    }
}

fn render_month(month: &CalendarMonth) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        r#"<div class="calendar"><h3>{}-{:02}</h3><div class="calendar-grid">"#,
        month.year, month.month
    ));
    for (index, name) in DAY_NAMES.iter().enumerate() {
        let class = match index {
            0 => "day-header sun",
            6 => "day-header sat",
            _ => "day-header",
        };
        html.push_str(&format!(r#"<div class="{class}">{name}</div>"#));
    }
    for day in month.weeks.iter().flatten() {
        html.push_str(&format!(
            r#"<div class="{}" title="{}">{}</div>"#,
            day_classes(day),
            day.date,
            day.day
        ));
    }
    html.push_str("</div></div>");
    html
}

fn day_classes(day: &CalendarDay) -> String {
    let mut classes = vec!["day-box"];
    if day.checked {
        classes.push("checked");
    } else if day.today {
        classes.push("today");
    }
    if !day.in_period || !day.in_month {
        classes.push("outside");
    }
    if day.weekend {
        classes.push("weekend");
    }
    classes.join(" ")
}

fn render_records(store: &AttendanceStore) -> String {
    if store.is_empty() {
        return r#"<li class="empty">No records yet.</li>"#.to_string();
    }
    store
        .records_newest_first()
        .map(|(date, time)| format!("<li><strong>{date}</strong><span>{time}</span></li>"))
        .collect()
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{USER}} · Attendance</title>
  <style>
    :root {
      --bg: #f8f8f8;
      --ink: #333333;
      --title: #004a7c;
      --accent: #007bff;
      --ok: #4caf50;
      --ok-dark: #388e3c;
      --today: #ffc107;
      --today-dark: #ffa000;
      --weekend: #ff6347;
      --card: #ffffff;
      --shadow: 0 4px 15px rgba(0, 0, 0, 0.1);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg) 0%, #ffffff 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      color: var(--title);
      text-align: center;
      margin: 0;
      font-weight: 900;
    }

    .period {
      text-align: center;
      margin: 0;
    }

    .card {
      background: var(--card);
      border-radius: 15px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .actions {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 16px;
      align-items: center;
    }

    button {
      width: 100%;
      background: var(--ok);
      color: white;
      border: none;
      border-radius: 12px;
      padding: 10px 24px;
      font-size: 1.2rem;
      font-weight: bold;
      cursor: pointer;
      box-shadow: 0 4px 8px rgba(76, 175, 80, 0.4);
    }

    button:disabled {
      background: #b5b5b5;
      box-shadow: none;
      cursor: not-allowed;
    }

    .badge {
      display: inline-block;
      padding: 8px 14px;
      border-radius: 10px;
      font-weight: 600;
    }

    .badge.ok, .notice.ok {
      background: #e6f4ea;
      color: #2d7a4b;
    }

    .badge.warn, .notice.warn {
      background: #fff4d6;
      color: #8a6100;
    }

    .badge.muted {
      background: #eeeeee;
      color: #666666;
    }

    .notice {
      padding: 12px 16px;
      border-radius: 10px;
      margin-bottom: 8px;
    }

    .notice.error {
      background: #fde8e6;
      color: #c63b2b;
    }

    .notice.info {
      background: #e7f1ff;
      color: var(--title);
    }

    .metrics {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .metric {
      border-top: 5px solid var(--accent);
      text-align: center;
    }

    .metric .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #8b857d;
    }

    .metric .value {
      display: block;
      color: var(--accent);
      font-size: 2.2rem;
      font-weight: 900;
    }

    .progress {
      height: 12px;
      border-radius: 999px;
      background: #eeeeee;
      overflow: hidden;
    }

    .progress > div {
      height: 100%;
      background: var(--accent);
    }

    .calendar h3 {
      margin: 0 0 10px;
    }

    .calendar-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 5px;
      text-align: center;
    }

    .day-header {
      font-weight: bold;
      padding: 5px 0;
    }

    .day-header.sun {
      color: var(--weekend);
    }

    .day-header.sat {
      color: var(--accent);
    }

    .day-box {
      padding: 8px 0;
      border-radius: 8px;
      font-weight: 600;
    }

    .day-box.weekend {
      color: var(--weekend);
    }

    .day-box.checked {
      background: var(--ok);
      color: white;
      border: 2px solid var(--ok-dark);
    }

    .day-box.today {
      background: var(--today);
      color: var(--ink);
      border: 2px solid var(--today-dark);
      font-weight: 800;
    }

    .day-box.outside {
      color: #cccccc;
    }

    .records {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 6px;
    }

    .records li {
      display: flex;
      justify-content: space-between;
    }

    @media (max-width: 600px) {
      .actions {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>{{USER}} · Attendance</h1>
      <p class="period">Period: <code>{{PERIOD_START}}</code> to <code>{{PERIOD_END}}</code> (weekends included)</p>
    </header>
    <section>{{BANNER}}</section>
    <section class="card actions">
      <form method="post" action="/check-in">
        <button type="submit" {{DISABLED}}>Check in today</button>
      </form>
      <div>{{STATUS}}</div>
    </section>
    <section class="metrics">
      <div class="card">
        <span class="label">Progress</span>
        <div class="progress"><div style="width: {{PROGRESS}}%"></div></div>
      </div>
      <div class="card metric">
        <span class="label">Completion</span>
        <span class="value">{{PERCENT}}%</span>
        <span>{{CHECKED}} / {{TARGET}} days</span>
      </div>
      <div class="card metric">
        <span class="label">Current streak</span>
        <span class="value">{{STREAK}}</span>
        <span>days in a row</span>
      </div>
    </section>
    <section class="card">{{CALENDARS}}</section>
    <section class="card">
      <details>
        <summary>{{RECORD_COUNT}} check-in records</summary>
        <ul class="records">{{RECORDS}}</ul>
      </details>
    </section>
  </main>
</body>
</html>
"#;
