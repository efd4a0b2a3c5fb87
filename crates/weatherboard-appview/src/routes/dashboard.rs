//! Browser dashboard served at `/`

use axum::response::Html;

pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="de">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Wetter-Dashboard</title>
  <style>
    body { font-family: sans-serif; padding: 20px; }
    form { display: flex; justify-content: center; margin-bottom: 20px; }
    input { padding: 5px; margin-right: 10px; }
    button { padding: 5px; }
    #error { color: red; text-align: center; margin-top: 5px; min-height: 1.2em; }
    #widgets { margin-top: 20px; display: flex; flex-wrap: wrap; justify-content: center; }
    .card { border: 1px solid #ccc; margin: 10px; padding: 16px; border-radius: 6px; min-width: 240px; }
    .card h3 { margin-top: 0; }
    .missing { color: gray; }
  </style>
</head>
<body>
  <h1>Wetter-Dashboard</h1>

  <form id="add-form">
    <input id="location" type="text" placeholder="Ort eingeben...">
    <button type="submit">Hinzufügen</button>
  </form>
  <div id="error"></div>

  <div id="widgets">Laden...</div>

  <script>
    const MESSAGES = {
      LOCATION_REQUIRED: 'Bitte geben Sie einen Ort ein',
      LOCATION_NOT_FOUND: 'Bitte geben Sie einen gültigen Städtenamen ein',
    };

    function orDash(value) {
      return value === undefined || value === null ? '-' : value;
    }

    // Sunrise/sunset arrive as zone-less local times ("2025-08-01T05:20");
    // show the wall-clock part as-is.
    function formatLocalTime(iso) {
      if (!iso) return '-';
      const m = /T(\d{2}:\d{2})/.exec(iso);
      return m ? m[1] + ' Uhr' : iso;
    }

    function localNow(tz) {
      try {
        return new Date().toLocaleString('de-DE', tz ? { timeZone: tz } : undefined);
      } catch (err) {
        return new Date().toLocaleString('de-DE');
      }
    }

    function line(label, value) {
      const div = document.createElement('div');
      const b = document.createElement('b');
      b.textContent = label + ': ';
      div.appendChild(b);
      div.appendChild(document.createTextNode(value));
      return div;
    }

    function renderCard(widget) {
      const card = document.createElement('div');
      card.className = 'card';

      const title = document.createElement('h3');
      title.textContent = widget.location;
      card.appendChild(title);

      const w = widget.weather;
      if (w) {
        card.appendChild(line('Temperatur', w.temperature + ' °C'));
        card.appendChild(line('Wind', w.windspeed + ' km/h (' + w.winddirection + '°)'));
        card.appendChild(line('Luftfeuchtigkeit', orDash(w.humidity) + ' %'));
        card.appendChild(line('Bewölkung', orDash(w.cloudcover) + ' %'));
        card.appendChild(line('Niederschlag', orDash(w.precipitation) + ' mm'));
        card.appendChild(line('Regenwahrscheinlichkeit', orDash(w.precipitation_probability) + ' %'));
        card.appendChild(line('Sonnenaufgang', formatLocalTime(w.sunrise)));
        card.appendChild(line('Sonnenuntergang', formatLocalTime(w.sunset)));
        card.appendChild(line('Ortszeit', localNow(w.timezone)));
      } else {
        const missing = document.createElement('div');
        missing.className = 'missing';
        missing.textContent = 'Wetterdaten nicht verfügbar';
        card.appendChild(missing);
      }

      const del = document.createElement('button');
      del.textContent = 'Löschen';
      del.style.marginTop = '12px';
      del.addEventListener('click', () => removeWidget(widget.id));
      card.appendChild(del);

      return card;
    }

    function showError(body) {
      const text = body && (MESSAGES[body.code] || body.error);
      document.getElementById('error').textContent = text || 'Fehler beim Hinzufügen des Widgets';
    }

    async function refresh() {
      const container = document.getElementById('widgets');
      try {
        const res = await fetch('/api/widgets');
        const data = await res.json();
        container.replaceChildren(...(Array.isArray(data) ? data.map(renderCard) : []));
      } catch (err) {
        container.textContent = 'Widgets konnten nicht geladen werden';
      }
    }

    async function removeWidget(id) {
      const res = await fetch('/api/widgets/' + encodeURIComponent(id), { method: 'DELETE' });
      if (!res.ok) {
        showError(await res.json().catch(() => null));
      }
      refresh();
    }

    document.getElementById('add-form').addEventListener('submit', async (e) => {
      e.preventDefault();
      const input = document.getElementById('location');
      const location = input.value.trim();
      if (!location) {
        showError({ code: 'LOCATION_REQUIRED' });
        return;
      }

      document.getElementById('error').textContent = '';
      try {
        const res = await fetch('/api/widgets', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ location }),
        });
        if (!res.ok) {
          showError(await res.json().catch(() => null));
          return;
        }
        input.value = '';
        refresh();
      } catch (err) {
        showError(null);
      }
    });

    refresh();
  </script>
</body>
</html>"#;
