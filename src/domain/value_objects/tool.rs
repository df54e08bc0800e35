//! External tool identity
//!
//! The pipeline drives four executables it never reimplements. Each one has a
//! default program name and per-platform install hints shown when it cannot
//! be found on the search path.

use std::fmt;

/// A required external executable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tool {
    /// Interpreter used to create the isolated environment
    Interpreter,
    /// Settings-schema compiler
    SchemaCompiler,
    /// Declarative UI (blueprint) compiler
    BlueprintCompiler,
    /// Resource-bundle compiler
    ResourceCompiler,
}

/// Package manager an install hint is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Apt,
    Dnf,
    Pacman,
    Brew,
}

impl Platform {
    pub const ALL: [Platform; 4] = [Platform::Apt, Platform::Dnf, Platform::Pacman, Platform::Brew];

    /// Human label (distribution family)
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Apt => "Debian/Ubuntu",
            Platform::Dnf => "Fedora",
            Platform::Pacman => "Arch",
            Platform::Brew => "macOS",
        }
    }
}

impl Tool {
    /// Every tool the full pipeline needs, in check order
    pub const ALL: [Tool; 4] = [
        Tool::Interpreter,
        Tool::SchemaCompiler,
        Tool::BlueprintCompiler,
        Tool::ResourceCompiler,
    ];

    /// Default program name looked up on `PATH`
    pub fn default_program(&self) -> &'static str {
        match self {
            Tool::Interpreter => "python3",
            Tool::SchemaCompiler => "glib-compile-schemas",
            Tool::BlueprintCompiler => "blueprint-compiler",
            Tool::ResourceCompiler => "glib-compile-resources",
        }
    }

    /// Human-readable name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Interpreter => "python interpreter",
            Tool::SchemaCompiler => "schema compiler",
            Tool::BlueprintCompiler => "blueprint compiler",
            Tool::ResourceCompiler => "resource compiler",
        }
    }

    /// Key used in `[tools]` and JSON output
    pub fn key(&self) -> &'static str {
        match self {
            Tool::Interpreter => "python",
            Tool::SchemaCompiler => "schema_compiler",
            Tool::BlueprintCompiler => "blueprint_compiler",
            Tool::ResourceCompiler => "resource_compiler",
        }
    }

    /// Install command for a platform, if the tool is packaged there
    pub fn install_hint(&self, platform: Platform) -> Option<&'static str> {
        match (self, platform) {
            (Tool::Interpreter, Platform::Apt) => {
                Some("sudo apt install python3 python3-venv python3-gi")
            }
            (Tool::Interpreter, Platform::Dnf) => Some("sudo dnf install python3 python3-gobject"),
            (Tool::Interpreter, Platform::Pacman) => {
                Some("sudo pacman -S python python-gobject")
            }
            (Tool::Interpreter, Platform::Brew) => Some("brew install python pygobject3"),

            (Tool::SchemaCompiler, Platform::Apt) => Some("sudo apt install libglib2.0-bin"),
            (Tool::SchemaCompiler, Platform::Dnf) => Some("sudo dnf install glib2"),
            (Tool::SchemaCompiler, Platform::Pacman) => Some("sudo pacman -S glib2"),
            (Tool::SchemaCompiler, Platform::Brew) => Some("brew install glib"),

            (Tool::BlueprintCompiler, Platform::Apt) => {
                Some("sudo apt install blueprint-compiler")
            }
            (Tool::BlueprintCompiler, Platform::Dnf) => {
                Some("sudo dnf install blueprint-compiler")
            }
            (Tool::BlueprintCompiler, Platform::Pacman) => {
                Some("sudo pacman -S blueprint-compiler")
            }
            (Tool::BlueprintCompiler, Platform::Brew) => None,

            (Tool::ResourceCompiler, Platform::Apt) => Some("sudo apt install libglib2.0-dev-bin"),
            (Tool::ResourceCompiler, Platform::Dnf) => Some("sudo dnf install glib2-devel"),
            (Tool::ResourceCompiler, Platform::Pacman) => Some("sudo pacman -S glib2"),
            (Tool::ResourceCompiler, Platform::Brew) => Some("brew install glib"),
        }
    }

    /// Fallback hint when no package exists for a platform
    pub fn source_hint(&self) -> Option<&'static str> {
        match self {
            Tool::BlueprintCompiler => {
                Some("build from source: https://gitlab.gnome.org/GNOME/blueprint-compiler")
            }
            _ => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
