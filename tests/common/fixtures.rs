//! Reusable project content and fake tool scripts.
//!
//! The fake tools are POSIX shell scripts. They append the system
//! directories to `PATH` themselves because `hatch` runs with `PATH` set to
//! the private tool directory only. Each appends a line to `$HATCH_TEST_LOG`.

pub const DEMO_CONFIG: &str = r#"
[app]
id = "org.example.Demo"
name = "Demo"
version = "1.2.0"

[[groups]]
name = "widgets"

[[groups]]
name = "dialogs"

[resources]
styles = ["data/style.css"]
"#;

pub const BLUEPRINT: &str = "using Gtk 4.0;\n\ntemplate $Widget : Gtk.Box {}\n";

pub const STYLESHEET: &str = "window.demo { background: @window_bg_color; }\n";

pub const SCHEMA_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<schemalist>
  <schema id="@app_id@" path="@prefix@/">
    <key name="dark-mode" type="b"><default>false</default></key>
  </schema>
</schemalist>
"#;

/// Interpreter stand-in.
///
/// `-m venv DIR` copies itself into `DIR/bin/python3`, `-m pip` succeeds,
/// anything else is a launch that prints `$FAKE_APP_STDOUT` and exits with
/// `$FAKE_APP_EXIT`.
pub const FAKE_PYTHON: &str = r#"#!/bin/sh
PATH="$PATH:/usr/bin:/bin"
log="${HATCH_TEST_LOG:-/dev/null}"
if [ "$1" = "-m" ] && [ "$2" = "venv" ]; then
  for dir; do :; done
  mkdir -p "$dir/bin"
  cp "$0" "$dir/bin/python3"
  chmod +x "$dir/bin/python3"
  echo "venv $dir" >> "$log"
  exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "pip" ]; then
  echo "pip $5" >> "$log"
  exit 0
fi
echo "launch $1 VIRTUAL_ENV=$VIRTUAL_ENV GSETTINGS_SCHEMA_DIR=$GSETTINGS_SCHEMA_DIR" >> "$log"
if [ -n "$FAKE_APP_STDOUT" ]; then
  echo "$FAKE_APP_STDOUT"
fi
exit "${FAKE_APP_EXIT:-0}"
"#;

/// `batch-compile OUT INPUT SOURCES...` writes one `.ui` per source at the
/// source's path below INPUT.
///
/// With `$FAKE_BLP_FAIL` set it prints a diagnostic and exits with that code.
pub const FAKE_BLUEPRINT_COMPILER: &str = r#"#!/bin/sh
PATH="$PATH:/usr/bin:/bin"
log="${HATCH_TEST_LOG:-/dev/null}"
if [ -n "$FAKE_BLP_FAIL" ]; then
  echo "error: unexpected token" >&2
  exit "$FAKE_BLP_FAIL"
fi
shift
out="$1"
input="$2"
shift
shift
for src; do
  rel="${src#"$input"/}"
  dest="$out/${rel%.blp}.ui"
  mkdir -p "$(dirname "$dest")"
  name=$(basename "$src" .blp)
  echo "<interface><!-- $name --></interface>" > "$dest"
done
echo "blueprint $out" >> "$log"
exit 0
"#;

/// Copies the manifest to `--target` so the archive mirrors the descriptor.
pub const FAKE_RESOURCE_COMPILER: &str = r#"#!/bin/sh
PATH="$PATH:/usr/bin:/bin"
log="${HATCH_TEST_LOG:-/dev/null}"
target=""
manifest=""
for arg; do
  case "$arg" in
    --target=*) target="${arg#--target=}" ;;
    --*) ;;
    *) manifest="$arg" ;;
  esac
done
cp "$manifest" "$target"
echo "resources $target" >> "$log"
exit 0
"#;

pub const FAKE_SCHEMA_COMPILER: &str = r#"#!/bin/sh
PATH="$PATH:/usr/bin:/bin"
log="${HATCH_TEST_LOG:-/dev/null}"
for dir; do :; done
echo "compiled" > "$dir/gschemas.compiled"
echo "schemas $dir" >> "$log"
exit 0
"#;
