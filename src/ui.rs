use crate::models::SessionView;

pub fn render_index(view: &SessionView) -> String {
    let school = view
        .school
        .as_ref()
        .map(|school| escape_html(&school.name))
        .unwrap_or_else(|| "No school selected".to_string());
    INDEX_HTML.replace("{{SCHOOL}}", &school)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Question Builder</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #26292b;
      --accent: #e2583e;
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
      background: linear-gradient(135deg, var(--bg), #e9eef0 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      margin: 0 auto;
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .school-picker {
      display: flex;
      gap: 12px;
      align-items: center;
    }

    .school-picker input {
      flex: 1;
      padding: 12px 16px;
      border-radius: 999px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      font-size: 1rem;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    .clickable {
      background: white;
      border-radius: 16px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.1);
      cursor: pointer;
      min-height: 120px;
    }

    .clickable h2 {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #7d8489;
      margin: 0 0 8px;
    }

    .clickable p {
      margin: 4px 0;
    }

    .actions {
      display: flex;
      gap: 12px;
      flex-wrap: wrap;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button.primary {
      background: var(--accent);
    }

    #darkener {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.4);
      display: none;
    }

    #popup {
      position: fixed;
      top: 8vh;
      left: 50%;
      transform: translateX(-50%);
      width: min(560px, 92vw);
      max-height: 80vh;
      overflow-y: auto;
      background: white;
      border-radius: 20px;
      padding: 24px;
      display: none;
    }

    #popup .param {
      padding: 8px 12px;
      border-radius: 10px;
      cursor: pointer;
      margin: 4px 0;
    }

    #popup .param.pending {
      background: var(--accent-2);
      color: white;
    }

    #popup .param.all {
      font-weight: 600;
    }

    .answer table {
      border-collapse: collapse;
      width: 100%;
    }

    .answer .asked {
      margin: 2px 0;
      color: #5f666b;
    }

    .answer td {
      padding: 6px 10px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.1);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Question Builder</h1>
      <p id="school-name">{{SCHOOL}}</p>
    </header>

    <section class="school-picker">
      <input id="teams" list="team-options" placeholder="Type a school name" autocomplete="off" />
      <datalist id="team-options"></datalist>
    </section>

    <section class="grid" id="clickables"></section>

    <section class="custom">
      <input id="main-stat" placeholder="Custom stat (e.g. points)" />
      <input id="per-what" placeholder="per (e.g. game)" />
      <button id="custom-button">Add custom stat</button>
    </section>

    <section class="actions">
      <button id="calc-button" class="primary">Calculate</button>
      <button id="reset-button">Deselect all</button>
      <button id="instructions-button">Instructions</button>
    </section>

    <section id="answers"></section>
  </main>

  <div id="darkener"></div>
  <div id="popup">
    <h2 id="popup-title"></h2>
    <div id="popup-content"></div>
    <button id="close-button">Done</button>
  </div>

  <script>
    const teamsEl = document.getElementById('teams');
    const optionsEl = document.getElementById('team-options');
    const clickablesEl = document.getElementById('clickables');
    const popupEl = document.getElementById('popup');
    const darkenerEl = document.getElementById('darkener');
    const popupTitleEl = document.getElementById('popup-title');
    const popupContentEl = document.getElementById('popup-content');
    const answersEl = document.getElementById('answers');
    const schoolNameEl = document.getElementById('school-name');

    let matches = [];
    let showingInstructions = false;

    const INSTRUCTIONS = [
      ['', 'To begin, select a school. Then click the boxes described below to add games and players to each category as appropriate.'],
      ['Games', 'are the games that will be included in statistics calculation.'],
      ['On court', 'are the players that must be on court when an action is made in order for it to count towards a calculation.'],
      ['Off court', 'are the players that must not be on court. (See above.)'],
      ['Making actions', 'are the players whose actions are calculated.'],
      ['Not making actions', "are the players whose actions are not counted. This is only useful in conjunction with the 'All players' option for Making actions."],
      ['Statistics', 'are the stats to calculate with the chosen options.'],
    ];

    const api = async (method, url, body) => {
      const options = { method, headers: {} };
      if (body !== undefined) {
        options.headers['Content-Type'] = 'application/json';
        options.body = JSON.stringify(body);
      }
      const response = await fetch(url, options);
      if (!response.ok) {
        const text = await response.text();
        alert(text || response.statusText);
        throw new Error(text);
      }
      return response.json();
    };

    const textEl = (tag, text, className) => {
      const el = document.createElement(tag);
      el.textContent = text;
      if (className) {
        el.className = className;
      }
      return el;
    };

    const render = (view) => {
      schoolNameEl.textContent = view.school ? view.school.name : 'No school selected';

      clickablesEl.innerHTML = '';
      view.categories.forEach((category) => {
        const box = document.createElement('div');
        box.className = 'clickable';
        box.appendChild(textEl('h2', category.title));
        category.items
          .filter((item) => item.committed)
          .forEach((item) => box.appendChild(textEl('p', item.label)));
        box.addEventListener('click', () => {
          api('POST', `/api/popup/${category.category}/open`).then(render).catch(() => {});
        });
        clickablesEl.appendChild(box);
      });

      const open = view.categories.find((category) => category.category === view.open_popup);
      if (open) {
        showingInstructions = false;
        popupTitleEl.textContent = open.title;
        popupContentEl.innerHTML = '';
        open.items.forEach((item) => {
          const classes = ['param'];
          if (item.is_all) classes.push('all');
          if (item.pending) classes.push('pending');
          const el = textEl('p', item.label, classes.join(' '));
          el.addEventListener('click', () => {
            api('POST', '/api/popup/toggle', { id: item.id }).then(render).catch(() => {});
          });
          popupContentEl.appendChild(el);
        });
        popupEl.style.display = 'block';
        darkenerEl.style.display = 'block';
      } else if (!showingInstructions) {
        popupEl.style.display = 'none';
        darkenerEl.style.display = 'none';
      }

      answersEl.innerHTML = '';
      view.answers.forEach((card) => {
        const wrapper = document.createElement('div');
        wrapper.className = 'answer';
        wrapper.appendChild(textEl('h2', card.school));
        card.selections.forEach((snapshot) => {
          const labels = snapshot.labels.length ? snapshot.labels.join(', ') : 'none';
          wrapper.appendChild(textEl('p', `${snapshot.title}: ${labels}`, 'asked'));
        });
        const table = document.createElement('table');
        card.rows.forEach((row) => {
          const tr = document.createElement('tr');
          tr.appendChild(textEl('td', row.stat));
          tr.appendChild(textEl('td', String(row.answer)));
          table.appendChild(tr);
        });
        wrapper.appendChild(table);
        answersEl.appendChild(wrapper);
      });
    };

    const refresh = () => api('GET', '/api/session').then(render).catch(() => {});

    teamsEl.addEventListener('input', async () => {
      const term = teamsEl.value;
      const chosen = matches.find((match) => match.value === term);
      if (chosen) {
        teamsEl.value = '';
        api('POST', '/api/school', { school_id: chosen.id }).then(render).catch(() => {});
        return;
      }
      try {
        matches = await api('GET', `/api/schools?term=${encodeURIComponent(term)}`);
      } catch (err) {
        return;
      }
      optionsEl.innerHTML = '';
      matches.forEach((match) => {
        const option = document.createElement('option');
        option.value = match.value;
        optionsEl.appendChild(option);
      });
    });

    document.getElementById('close-button').addEventListener('click', () => {
      if (showingInstructions) {
        showingInstructions = false;
        popupEl.style.display = 'none';
        darkenerEl.style.display = 'none';
        return;
      }
      api('POST', '/api/popup/close').then(render).catch(() => {});
    });

    document.getElementById('instructions-button').addEventListener('click', () => {
      showingInstructions = true;
      popupTitleEl.textContent = 'Instructions';
      popupContentEl.innerHTML = '';
      INSTRUCTIONS.forEach(([term, text]) => {
        const p = document.createElement('p');
        if (term) {
          p.appendChild(textEl('strong', term));
          p.appendChild(document.createTextNode(' '));
        }
        p.appendChild(document.createTextNode(text));
        popupContentEl.appendChild(p);
      });
      popupEl.style.display = 'block';
      darkenerEl.style.display = 'block';
    });

    document.getElementById('reset-button').addEventListener('click', () => {
      api('POST', '/api/deselect').then(render).catch(() => {});
    });

    document.getElementById('custom-button').addEventListener('click', () => {
      const main_stat = document.getElementById('main-stat').value;
      const per_what = document.getElementById('per-what').value;
      api('POST', '/api/stats/custom', { main_stat, per_what }).then(render).catch(() => {});
    });

    document.getElementById('calc-button').addEventListener('click', () => {
      api('POST', '/api/calculate').then(refresh).catch(() => {});
    });

    refresh();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SchoolView;

    fn view(name: Option<&str>) -> SessionView {
        SessionView {
            school: name.map(|name| SchoolView {
                id: 1,
                name: name.to_string(),
            }),
            open_popup: None,
            categories: Vec::new(),
            answers: Vec::new(),
        }
    }

    #[test]
    fn page_names_the_current_school() {
        let html = render_index(&view(Some("Texas A&M")));
        assert!(html.contains("<p id=\"school-name\">Texas A&amp;M</p>"));
    }

    #[test]
    fn page_offers_instructions_popup() {
        let html = render_index(&view(None));
        assert!(html.contains("id=\"instructions-button\""));
        assert!(html.contains("are the players whose actions are calculated."));
    }

    #[test]
    fn page_without_school_says_so() {
        let html = render_index(&view(None));
        assert!(html.contains("No school selected"));
        assert!(!html.contains("{{SCHOOL}}"));
    }
}
