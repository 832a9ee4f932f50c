//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Parley Configuration
# Only override what you want to change -- missing fields use defaults.

[provider]
# base_url = "https://api.openai.com/v1"
# api_key_env = "OPENAI_API_KEY"   # the key itself is never written here
# connect_timeout_secs = 10        # 1-120
# request_timeout_secs = 120       # 1-600
# function_style = "tools"         # tools, functions

[session]
# model = "gpt-4o-mini"
# seed = "none"                    # none, placeholder, custom
# seed_text = ""                   # required when seed = "custom"

[structured]
# function_name = "extract_field"
# function_description = "Return the requested output in a single named field"
# field = "content"
# field_description = "The requested output"

[logging]
# level = "info"                   # trace, debug, info, warn, error
# directives = ["reqwest=warn"]
"##
    .to_string()
}
