//! The browser page served at `/`.
//!
//! It draws whatever `/api/map` returns: tile layer, viewport, styled
//! countries and the optional featured marker. Hover applies the
//! `highlight_style` and raises the layer; leaving restores `style`.
//! The per-layer `highlighted` flag follows
//! [`FeatureInteraction`](crate::render::FeatureInteraction) transition for
//! transition.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>News Map</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>
    html, body, #map { height: 100%; margin: 0; }
    .popup h3 { margin: 0 0 4px 0; }
    .popup p { margin: 2px 0; }
    #status { position: absolute; top: 8px; left: 50px; z-index: 1000;
              background: #fff; padding: 4px 8px; font: 13px sans-serif; display: none; }
  </style>
</head>
<body>
  <div id="status"></div>
  <div id="map"></div>
  <script>
    function popupNode(popup) {
      const root = document.createElement("div");
      root.className = "popup";
      const h = document.createElement("h3");
      h.textContent = popup.location;
      root.appendChild(h);
      const count = document.createElement("p");
      count.textContent = popup.count + (popup.count === 1 ? " article" : " articles");
      root.appendChild(count);
      if (popup.sample) {
        const title = document.createElement("p");
        title.innerHTML = "<strong></strong>";
        title.firstChild.textContent = popup.sample.title;
        root.appendChild(title);
        const desc = document.createElement("p");
        desc.textContent = popup.sample.description;
        root.appendChild(desc);
      } else {
        const none = document.createElement("p");
        none.textContent = "No articles";
        root.appendChild(none);
      }
      return root;
    }

    function showStatus(text) {
      const el = document.getElementById("status");
      el.textContent = text;
      el.style.display = "block";
    }

    fetch("/api/map")
      .then(resp => resp.json().then(body => ({ ok: resp.ok, body })))
      .then(({ ok, body }) => {
        if (!ok) {
          console.log("Problem loading map: " + body.message);
          showStatus("Map unavailable: " + body.message);
          return;
        }
        const map = L.map("map", { zoomSnap: body.viewport.zoom_snap })
          .setView(body.viewport.center, body.viewport.zoom);
        L.tileLayer(body.tiles.url, {
          maxZoom: body.tiles.max_zoom,
          attribution: body.tiles.attribution
        }).addTo(map);

        L.geoJSON(body.countries, {
          style: feature => feature.properties.style,
          onEachFeature: (feature, layer) => {
            let highlighted = false;
            layer.on({
              mouseover: () => {
                if (highlighted) return;
                highlighted = true;
                layer.setStyle(feature.properties.highlight_style);
                layer.bringToFront();
              },
              mouseout: () => {
                if (!highlighted) return;
                highlighted = false;
                layer.setStyle(feature.properties.style);
              }
            });
            layer.bindPopup(() => popupNode(feature.properties.popup));
          }
        }).addTo(map);

        if (body.marker) {
          L.marker(body.marker.position)
            .bindPopup(() => popupNode(body.marker.popup))
            .addTo(map);
        }
      })
      .catch(error => {
        console.log("Problem loading /api/map: " + error);
        showStatus("Map unavailable");
      });
  </script>
</body>
</html>
"#;
