use mentionwatch_common::{Mention, Sentiment};

/// Render the dashboard: every stored mention, most recent first.
pub fn render_dashboard(mentions: &[Mention]) -> String {
    let mut cards = String::new();

    if mentions.is_empty() {
        cards.push_str(
            r#"<p style="color:#888;text-align:center;padding:40px;">No mentions collected yet. Trigger a scrape to populate the feed.</p>"#,
        );
    }

    for mention in mentions {
        let badge_class = match mention.sentiment {
            Sentiment::Positive => "badge-positive",
            Sentiment::Negative => "badge-negative",
            Sentiment::Neutral => "badge-neutral",
        };

        cards.push_str(&format!(
            r#"<div class="mention-card">
<div class="meta-row">
<span class="badge badge-keyword">{keyword}</span>
<span class="badge {badge_class}">{sentiment}</span>
<span>{author}</span>
<span>{created}</span>
</div>
<p class="text">{text}</p>
<a href="{url}" target="_blank" rel="noopener">View source</a>
</div>
"#,
            keyword = html_escape(&mention.keyword),
            sentiment = mention.sentiment,
            author = html_escape(&mention.author),
            created = mention.created_at.format("%Y-%m-%d %H:%M UTC"),
            text = html_escape(&mention.text),
            url = html_escape(&mention.url),
        ));
    }

    let content = format!(
        r#"<div class="toolbar">
<button id="scrape-btn" class="action-btn">Run scrape</button>
<span id="scrape-status"></span>
</div>
{cards}
<script>
document.getElementById('scrape-btn').addEventListener('click', () => {{
    const status = document.getElementById('scrape-status');
    status.textContent = 'Scraping…';
    fetch('/api/scrape', {{ method: 'POST' }})
        .then(r => r.json())
        .then(data => {{
            if (data.success) {{
                status.textContent = `Saved ${{data.savedCount}} of ${{data.totalAnalyzed}} analyzed`;
                setTimeout(() => location.reload(), 800);
            }} else {{
                status.textContent = `Failed: ${{data.error}}`;
            }}
        }})
        .catch(e => {{ status.textContent = `Failed: ${{e}}`; }});
}});
</script>"#
    );

    build_page("Mentions", &content)
}

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — MentionWatch</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.header{{background:#1a1a1a;color:#fff;padding:12px 24px;display:flex;align-items:center;justify-content:space-between;}}
.header h1{{font-size:18px;font-weight:600;}}
.container{{max-width:860px;margin:0 auto;padding:24px;}}
.toolbar{{display:flex;gap:12px;align-items:center;margin-bottom:20px;}}
.mention-card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:12px;}}
.mention-card:hover{{border-color:#999;}}
.mention-card .text{{color:#333;font-size:14px;margin:8px 0;}}
.mention-card a{{font-size:13px;color:#0066cc;}}
.badge{{display:inline-block;padding:2px 8px;border-radius:12px;font-size:11px;font-weight:600;text-transform:uppercase;}}
.badge-keyword{{background:#e3f2fd;color:#1565c0;}}
.badge-positive{{background:#e8f5e9;color:#2e7d32;}}
.badge-negative{{background:#fce4ec;color:#c62828;}}
.badge-neutral{{background:#f5f5f5;color:#616161;}}
.meta-row{{display:flex;gap:12px;align-items:center;font-size:12px;color:#888;}}
.action-btn{{display:inline-block;padding:6px 16px;background:#0066cc;color:#fff;border:none;border-radius:4px;font-size:13px;font-weight:500;cursor:pointer;}}
.action-btn:hover{{background:#004499;}}
</style>
</head>
<body>
<div class="header">
<h1>MentionWatch</h1>
</div>
<div class="container">
{content}
</div>
</body>
</html>"#
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
