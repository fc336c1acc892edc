//! Symbol tables for LaTeX to text conversion
//!
//! Keys are command names without the leading backslash. Lookups are done on
//! whole command words, so `\pm` never fires inside `\pmod`.

use phf::phf_map;

/// Greek letter commands and their Unicode glyphs.
pub static GREEK_LETTERS: phf::Map<&'static str, &'static str> = phf_map! {
    // Lowercase
    "alpha" => "α",
    "beta" => "β",
    "gamma" => "γ",
    "delta" => "δ",
    "epsilon" => "ε",
    "varepsilon" => "ϵ",
    "zeta" => "ζ",
    "eta" => "η",
    "theta" => "θ",
    "vartheta" => "ϑ",
    "iota" => "ι",
    "kappa" => "κ",
    "lambda" => "λ",
    "mu" => "μ",
    "nu" => "ν",
    "xi" => "ξ",
    "omicron" => "ο",
    "pi" => "π",
    "varpi" => "ϖ",
    "rho" => "ρ",
    "varrho" => "ϱ",
    "sigma" => "σ",
    "varsigma" => "ς",
    "tau" => "τ",
    "upsilon" => "υ",
    "phi" => "φ",
    "varphi" => "ϕ",
    "chi" => "χ",
    "psi" => "ψ",
    "omega" => "ω",
    // Uppercase (the ones without a Latin look-alike)
    "Gamma" => "Γ",
    "Delta" => "Δ",
    "Theta" => "Θ",
    "Lambda" => "Λ",
    "Xi" => "Ξ",
    "Pi" => "Π",
    "Sigma" => "Σ",
    "Upsilon" => "Υ",
    "Phi" => "Φ",
    "Psi" => "Ψ",
    "Omega" => "Ω",
};

/// Operators, relations and function names.
pub static MATH_SYMBOLS: phf::Map<&'static str, &'static str> = phf_map! {
    "times" => "×",
    "cdot" => "·",
    "pm" => "±",
    "mp" => "∓",
    "leq" => "≤",
    "le" => "≤",
    "geq" => "≥",
    "ge" => "≥",
    "neq" => "≠",
    "ne" => "≠",
    "approx" => "≈",
    "sim" => "∼",
    "propto" => "∝",
    "odot" => "⊙",
    "infty" => "∞",
    "partial" => "∂",
    "nabla" => "∇",
    "int" => "∫",
    "sum" => "∑",
    "prod" => "∏",
    "log" => "log",
    "ln" => "ln",
    "exp" => "exp",
    "sin" => "sin",
    "cos" => "cos",
    "tan" => "tan",
};
