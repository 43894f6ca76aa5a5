use crate::dates::{date_key, weekday_label};
use crate::grid::DayCell;
use crate::models::{
    HabitView, DEFAULT_CUSTOM_DAYS, DEFAULT_MONTHLY_TARGET, DEFAULT_NAME, DEFAULT_WEEKLY_TARGET,
};
use chrono::NaiveDate;
use std::fmt::Write;

pub fn render_index(today: NaiveDate, habits: &[HabitView]) -> String {
    let cards: String = habits.iter().map(render_card).collect();
    INDEX_HTML
        .replace("{{TODAY}}", &date_key(today))
        .replace("{{DAY_OPTIONS}}", &render_day_options())
        .replace("{{DEFAULT_NAME}}", DEFAULT_NAME)
        .replace("{{WEEKLY}}", &DEFAULT_WEEKLY_TARGET.to_string())
        .replace("{{MONTHLY}}", &DEFAULT_MONTHLY_TARGET.to_string())
        .replace("{{HABITS}}", &cards)
}

fn render_card(view: &HabitView) -> String {
    let mut columns = String::new();
    for column in &view.grid.columns {
        columns.push_str(r#"<div class="day-column">"#);
        for cell in column {
            columns.push_str(&render_day(&view.habit.id, cell));
        }
        columns.push_str("</div>");
    }

    format!(
        r#"<article class="habit-card">
  <header class="habit-card__header">
    <div class="habit-card__title">{name}</div>
    <div class="habit-card__goal">{description}</div>
  </header>
  <div class="summary">
    <div><span class="label">Today</span><span class="value">{today}</span></div>
    <div><span class="label">Progress</span><span class="value">{progress}</span></div>
  </div>
  <div class="grid">{columns}</div>
</article>
"#,
        name = escape_html(&view.habit.settings.name),
        description = escape_html(&view.description),
        today = view.summary.today.label(),
        progress = view.summary.label,
    )
}

fn render_day(habit_id: &str, cell: &DayCell) -> String {
    let mut class = String::from("day");
    if cell.is_today {
        class.push_str(" day--today");
    }
    if cell.done {
        class.push_str(" day--done");
    }
    let title = format!("{} ({})", cell.key, weekday_label(cell.weekday));

    if !cell.is_target {
        class.push_str(" day--inactive");
        return format!(
            r#"<button type="button" class="{class}" title="{title}" aria-disabled="true" disabled></button>"#
        );
    }

    format!(
        r#"<form method="post" action="/habits/{id}/toggle"><input type="hidden" name="date" value="{key}" /><button type="submit" class="{class}" title="{title}"></button></form>"#,
        id = escape_html(habit_id),
        key = cell.key,
    )
}

fn render_day_options() -> String {
    let mut options = String::new();
    for day in 0..7u8 {
        let checked = if DEFAULT_CUSTOM_DAYS.contains(&day) {
            " checked"
        } else {
            ""
        };
        let _ = write!(
            options,
            r#"<label><input type="checkbox" name="day_{day}"{checked} /> {label}</label>"#,
            label = weekday_label(day),
        );
    }
    options
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
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg: #f8f3e6;
      --ink: #2b2a28;
      --muted: #8b857d;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --empty: #ece6da;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: linear-gradient(135deg, var(--bg), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    main {
      width: min(900px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: Georgia, serif;
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .panel,
    .habit-card {
      background: var(--card);
      border-radius: 20px;
      padding: 24px;
      box-shadow: 0 16px 40px rgba(47, 72, 88, 0.14);
      display: grid;
      gap: 16px;
    }

    .habit-form {
      display: grid;
      gap: 12px;
    }

    .field {
      display: grid;
      gap: 4px;
    }

    .days {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
    }

    .habit-card__title {
      font-size: 1.3rem;
      font-weight: 600;
    }

    .habit-card__goal,
    .label {
      color: var(--muted);
    }

    .summary {
      display: flex;
      gap: 32px;
    }

    .summary span {
      display: block;
    }

    .value {
      font-size: 1.4rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .grid {
      display: flex;
      gap: 4px;
      overflow-x: auto;
    }

    .day-column {
      display: grid;
      grid-template-rows: repeat(7, 16px);
      gap: 4px;
    }

    .day-column form {
      margin: 0;
    }

    .day {
      width: 16px;
      height: 16px;
      border: none;
      border-radius: 4px;
      padding: 0;
      background: var(--empty);
      cursor: pointer;
    }

    .day--done {
      background: var(--accent);
    }

    .day--today {
      outline: 2px solid var(--accent-2);
    }

    .day--inactive {
      opacity: 0.3;
      cursor: not-allowed;
    }

    button.submit {
      justify-self: start;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Habit Tracker</h1>
      <p class="subtitle">Today is {{TODAY}}</p>
    </header>

    <section class="panel">
      <form class="habit-form" method="post" action="/habits">
        <label class="field">Name
          <input name="name" placeholder="{{DEFAULT_NAME}}" />
        </label>
        <label class="field">Goal
          <select name="goal" id="habit-goal">
            <option value="daily">Daily</option>
            <option value="weekly">Weekly</option>
            <option value="monthly">Monthly</option>
            <option value="custom">Specific days</option>
          </select>
        </label>
        <label class="field" id="weekly-goal-field">Days per week
          <input type="number" min="1" max="7" name="weekly_target" value="{{WEEKLY}}" />
        </label>
        <label class="field" id="monthly-goal-field">Days per month
          <input type="number" min="1" max="31" name="monthly_target" value="{{MONTHLY}}" />
        </label>
        <div class="days" id="custom-days-field">{{DAY_OPTIONS}}</div>
        <button class="submit" type="submit">Add habit</button>
      </form>
    </section>

    {{HABITS}}
  </main>
  <script>
    const goalSelect = document.getElementById("habit-goal");
    const fields = {
      weekly: document.getElementById("weekly-goal-field"),
      monthly: document.getElementById("monthly-goal-field"),
      custom: document.getElementById("custom-days-field"),
    };
    const syncFields = () => {
      for (const [goal, field] of Object.entries(fields)) {
        field.style.display = goalSelect.value === goal ? "" : "none";
      }
    };
    goalSelect.addEventListener("change", syncFields);
    syncFields();
  </script>
</body>
</html>
"#;
