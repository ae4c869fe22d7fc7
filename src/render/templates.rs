// Built-in page templates
// Each one can be replaced by a file of the same name in `render.template_dir`

pub const LAYOUT: &str = r##"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{% block title %}{{ title }}{% endblock %}</title>
    <style>
        body { font-family: -apple-system, "Segoe UI", Roboto, Arial, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; color: #333; }
        h1 { color: #667eea; border-bottom: 2px solid #667eea; padding-bottom: 5px; }
        table { width: 100%; border-collapse: collapse; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
        a { color: #667eea; text-decoration: none; }
        .error { color: #b00020; }
    </style>
</head>
<body>
{% block body %}{% endblock %}
</body>
</html>
"##;

pub const HOME: &str = r##"{% extends "layout.html" %}
{% block body %}
<h1>{{ title }}</h1>
<ul>
{% for resource in resources %}
    <li><a href="/{{ resource.name }}">{{ resource.title }}</a></li>
{% endfor %}
</ul>
{% endblock %}
"##;

pub const INDEX: &str = r##"{% extends "layout.html" %}
{% block body %}
<h1>{{ resource.title }}</h1>
<p><a href="/{{ resource.name }}/new">New</a></p>
<ul>
{% for record in records %}
    <li><a href="/{{ resource.name }}/{{ record.id }}">{{ record.name or "#" ~ record.id }}</a></li>
{% else %}
    <li>Nothing here yet.</li>
{% endfor %}
</ul>
<p><a href="/">Home</a></p>
{% endblock %}
"##;

pub const SHOW: &str = r##"{% extends "layout.html" %}
{% block body %}
<h1>{{ record.name or resource.title ~ " #" ~ record.id }}</h1>
<table>
{% for key, value in record|items %}
    <tr><th>{{ key }}</th><td>{% if value is sequence and value is not string %}{{ value|join(", ") }}{% else %}{{ value }}{% endif %}</td></tr>
{% endfor %}
</table>
<p>
    <a href="/{{ resource.name }}/{{ record.id }}/edit">Edit</a>
    | <a href="/{{ resource.name }}">Back</a>
</p>
<form action="/{{ resource.name }}/{{ record.id }}?_method=DELETE" method="POST">
    <input type="submit" value="Delete">
</form>
{% endblock %}
"##;

pub const FORM: &str = r##"{% extends "layout.html" %}
{% block body %}
<h1>{% if record %}Edit {{ record.name or "#" ~ record.id }}{% else %}New {{ resource.title }}{% endif %}</h1>
{% if record %}
<form action="/{{ resource.name }}/{{ record.id }}?_method=PUT" method="POST">
{% else %}
<form action="/{{ resource.name }}" method="POST">
{% endif %}
{% for field in resource.fields %}
    {% set value = record[field.name] if record else none %}
    <p>
        <label for="{{ field.name }}">{{ field.name }}{% if field.required %} *{% endif %}</label>
    {% if field.input_type == "checkbox" %}
        <input type="hidden" name="{{ field.name }}" value="false">
        <input type="checkbox" id="{{ field.name }}" name="{{ field.name }}"{% if value %} checked{% endif %}>
    {% elif value is sequence and value is not string and value|reject("string")|reject("number")|reject("boolean")|list %}
        <textarea id="{{ field.name }}" name="{{ field.name }}" rows="8" cols="60">{{ value|tojson(indent=2) }}</textarea>
    {% elif value is sequence and value is not string %}
        <input type="text" id="{{ field.name }}" name="{{ field.name }}" value="{{ value|join(", ") }}">
    {% else %}
        <input type="{{ field.input_type }}" id="{{ field.name }}" name="{{ field.name }}"{% if field.input_type == "number" %} step="any"{% endif %} value="{{ value if value is not none else "" }}">
    {% endif %}
    </p>
{% endfor %}
    <input type="submit" value="Save">
</form>
<p><a href="/{{ resource.name }}">Back</a></p>
{% endblock %}
"##;

pub const DELETED: &str = r##"{% extends "layout.html" %}
{% block body %}
<h1>Deleted</h1>
<p>{{ record.name or resource.title ~ " #" ~ record.id }} was removed.</p>
<p><a href="/{{ resource.name }}">Back to {{ resource.title }}</a></p>
{% endblock %}
"##;

pub const ERROR: &str = r##"{% extends "layout.html" %}
{% block body %}
<h1 class="error">{{ status }}</h1>
<p class="error">{{ message }}</p>
<p><a href="/">Home</a></p>
{% endblock %}
"##;

/// Template names paired with their built-in source
pub const DEFAULTS: [(&str, &str); 7] = [
    ("layout.html", LAYOUT),
    ("home.html", HOME),
    ("index.html", INDEX),
    ("show.html", SHOW),
    ("form.html", FORM),
    ("deleted.html", DELETED),
    ("error.html", ERROR),
];
