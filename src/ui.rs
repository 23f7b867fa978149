use crate::config::{RemoveControl, Settings};
use crate::models::{ActivityCard, Listing, SignupForm, StatusMessage};
use html_escaper::Escape;
use std::fmt::Write;

pub const LOADING_NOTICE: &str = "Loading activities...";
pub const FAILED_NOTICE: &str = "Failed to load activities. Please try again later.";
pub const NO_PARTICIPANTS: &str = "No participants yet";
pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

const TRASH_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" aria-hidden="true" focusable="false" width="14" height="14"><path fill="currentColor" d="M3 6h18v2H3V6zm2 3h14l-1 12H6L5 9zm3-6h8l1 2H7L8 3z"/></svg>"#;

/// What the page needs, gathered under the view lock.
pub struct Page<'a> {
    pub listing: Listing,
    pub cards: &'a [ActivityCard],
    pub options: &'a [String],
    pub draft: &'a SignupForm,
    pub status: Option<&'a StatusMessage>,
    pub settings: &'a Settings,
}

pub fn render_index(page: &Page<'_>) -> String {
    let hide_ms = page.settings.status_hide_after.as_millis().to_string();
    let activities = render_activities(page);
    let options = render_options(page.options, &page.draft.activity);
    let email = escape(&page.draft.email);
    let message = render_status(page.status);
    fill(
        INDEX_HTML,
        &[
            ("HIDE_MS", hide_ms.as_str()),
            ("ACTIVITIES", activities.as_str()),
            ("OPTIONS", options.as_str()),
            ("EMAIL", email.as_str()),
            ("MESSAGE", message.as_str()),
        ],
    )
}

pub fn render_activities(page: &Page<'_>) -> String {
    match page.listing {
        Listing::Loading => format!("<p>{LOADING_NOTICE}</p>"),
        Listing::Failed => format!("<p>{FAILED_NOTICE}</p>"),
        Listing::Loaded => page
            .cards
            .iter()
            .map(|card| render_card(card, page.settings.remove_control))
            .collect(),
    }
}

fn render_card(card: &ActivityCard, control: RemoveControl) -> String {
    let name = escape(&card.name);
    format!(
        r#"<div class="activity-card" data-activity="{name}">
  <h4>{name}</h4>
  <p>{description}</p>
  <p><strong>Schedule:</strong> {schedule}</p>
  <p class="availability"><strong>Availability:</strong> {spots} spots left</p>
  <div class="participants-section">
    <p><strong>Participants:</strong></p>
    {participants}
  </div>
</div>
"#,
        description = escape(&card.description),
        schedule = escape(&card.schedule),
        spots = card.spots_left,
        participants = render_participants(card, control),
    )
}

fn render_participants(card: &ActivityCard, control: RemoveControl) -> String {
    if card.participants.is_empty() {
        return format!(r#"<p class="no-participants">{NO_PARTICIPANTS}</p>"#);
    }

    let activity = escape(&card.name);
    let mut out = String::from(r#"<ul class="participant-list">"#);
    for participant in &card.participants {
        let email = escape(participant);
        let glyph = match control {
            RemoveControl::Icon => TRASH_ICON,
            RemoveControl::Text => "&times;",
        };
        let _ = write!(
            out,
            r#"<li class="participant-item"><span class="participant-name">{email}</span><form method="post" action="/unregister" class="remove-form"><input type="hidden" name="activity" value="{activity}" /><input type="hidden" name="email" value="{email}" /><button type="submit" class="remove-btn" aria-label="Remove {email}">{glyph}</button></form></li>"#
        );
    }
    out.push_str("</ul>");
    out
}

fn render_options(options: &[String], selected: &str) -> String {
    let mut out = format!(r#"<option value="">{SELECT_PLACEHOLDER}</option>"#);
    for name in options {
        let name = escape(name);
        let marker = if name == escape(selected) { " selected" } else { "" };
        let _ = write!(out, r#"<option value="{name}"{marker}>{name}</option>"#);
    }
    out
}

fn render_status(status: Option<&StatusMessage>) -> String {
    match status.filter(|message| message.visible) {
        Some(message) => format!(
            r#"<div id="message" class="{class}">{text}</div>"#,
            class = message.kind.css_class(),
            text = escape(&message.text),
        ),
        None => r#"<div id="message" class="hidden"></div>"#.to_string(),
    }
}

pub fn escape(input: &str) -> String {
    struct Escaped<'a>(&'a str);
    impl std::fmt::Display for Escaped<'_> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.escape(f, false)
        }
    }
    Escaped(input).to_string()
}

/// Substitutes `{{KEY}}` placeholders in one pass over the template, so
/// inserted values are never scanned for further placeholders.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Extracurricular Activities</title>
  <style>
    :root {
      --bg: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    main {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 24px;
    }

    section {
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 28px;
    }

    .activity-card {
      border: 1px solid rgba(47, 72, 88, 0.12);
      border-radius: 16px;
      padding: 16px;
      margin-bottom: 14px;
      background: white;
    }

    .activity-card h4 {
      margin: 0 0 8px;
      color: var(--accent-2);
    }

    .participant-list {
      list-style: none;
      padding: 0;
      margin: 0;
    }

    .participant-item {
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 4px 0;
    }

    .remove-form {
      margin: 0;
    }

    .remove-btn {
      border: none;
      background: transparent;
      color: #c63b2b;
      cursor: pointer;
      font-size: 1rem;
    }

    .no-participants {
      color: #8b857d;
      font-style: italic;
    }

    .form-group {
      display: grid;
      gap: 6px;
      margin-bottom: 14px;
    }

    button.primary {
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    button.secondary {
      border: 1px solid var(--accent-2);
      border-radius: 999px;
      padding: 8px 14px;
      background: transparent;
      color: var(--accent-2);
      cursor: pointer;
    }

    #message {
      margin-top: 16px;
      padding: 10px 14px;
      border-radius: 12px;
      animation: fade-out 0ms linear {{HIDE_MS}}ms forwards;
    }

    #message.success {
      background: #e3f4e8;
      color: #2d7a4b;
    }

    #message.error {
      background: #fbe4e1;
      color: #c63b2b;
    }

    .hidden {
      display: none;
    }

    @keyframes fade-out {
      to {
        visibility: hidden;
        opacity: 0;
      }
    }
  </style>
</head>
<body>
  <main>
    <section id="activities-container">
      <h3>Available Activities</h3>
      <form method="post" action="/refresh">
        <button type="submit" class="secondary">Refresh</button>
      </form>
      <div id="activities-list">
{{ACTIVITIES}}
      </div>
    </section>

    <section id="signup-container">
      <h3>Sign Up for an Activity</h3>
      <form id="signup-form" method="post" action="/signup">
        <div class="form-group">
          <label for="email">Student Email:</label>
          <input type="email" id="email" name="email" required placeholder="your-email@school.edu" value="{{EMAIL}}" />
        </div>
        <div class="form-group">
          <label for="activity">Select Activity:</label>
          <select id="activity" name="activity" required>
            {{OPTIONS}}
          </select>
        </div>
        <button type="submit" class="primary">Sign Up</button>
      </form>
      {{MESSAGE}}
    </section>
  </main>
</body>
</html>
"#;
