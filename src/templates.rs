//! Scanner configuration templates (masscan, nmap, NESCA).
//!
//! Plain text generation. The only inputs are file names and the fixed port
//! lists below.

use crate::hotspots::Category;

/// Ports for the masscan sweep
pub const MASSCAN_PORTS: &[u16] = &[80, 3000, 8000, 37777, 443, 554, 8080, 7200];

/// Ports for the NESCA profile
pub const NESCA_PORTS: &[u16] = &[80, 3000, 8000, 37777, 443, 554, 8080, 7200, 8443];

/// Quick nmap sweep over the combined list
pub const QUICK_PORTS: &[u16] = &[80, 3000, 8000, 37777];

/// Comprehensive camera sweep over the combined list
pub const CAMERA_PORTS: &[u16] = &[80, 443, 554, 8000, 8080, 37777, 3000];

pub const MASSCAN_FILE: &str = "masscan_russia.conf";
pub const NMAP_FILE: &str = "nmap_commands.txt";
pub const NESCA_FILE: &str = "nesca_config.txt";

/// File names the templates refer to.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    /// Combined target list
    pub combined_file: String,
    /// Generation timestamp, already formatted
    pub generated: String,
    /// Directory holding the per-category files, as written into commands
    pub category_dir: String,
}

impl TemplateContext {
    /// Path of a category file as it should appear in a command line.
    pub fn category_file(&self, category: Category) -> String {
        if self.category_dir.is_empty() {
            category.file_name()
        } else {
            format!(
                "{}/{}",
                self.category_dir.trim_end_matches('/'),
                category.file_name()
            )
        }
    }
}

/// Join ports as `80,443,...`
pub fn port_list(ports: &[u16]) -> String {
    ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

pub fn masscan_config(ctx: &TemplateContext) -> String {
    format!(
        "# Masscan config for Russia IP ranges
# Generated: {generated}

rate = 10000
ports = {ports}
range = {combined}
output-format = xml
output-filename = russia_scan.xml
banners = true
http-user-agent = Mozilla/5.0
",
        generated = ctx.generated,
        ports = port_list(MASSCAN_PORTS),
        combined = ctx.combined_file,
    )
}

pub fn nmap_commands(ctx: &TemplateContext) -> String {
    format!(
        "# Nmap scan for Russia targets
# Generated: {generated}

# Quick port scan (all main ports)
nmap -iL {combined} -p {quick} --open -T4 -oA russia_quick

# Hikvision specific
nmap -iL {hikvision} -p 8000,80,443,554 --script http-title -T4 -oA hikvision_scan

# SmartPSS specific
nmap -iL {smartpss} -p 3000,7200,7201 --script banner -T4 -oA smartpss_scan

# Web interfaces
nmap -iL {web} -p 80,443,8080 --script http-title,http-headers -T4 -oA web_scan

# Camera port 37777 (Dahua/Hikvision)
nmap -iL {camera} -p 37777 --script banner -sV -T4 -oA camera_37777_scan

# Comprehensive camera scan
nmap -iL {combined} -p {cameras} --script http-title,rtsp-methods -T4 -oA comprehensive_camera_scan
",
        generated = ctx.generated,
        combined = ctx.combined_file,
        quick = port_list(QUICK_PORTS),
        hikvision = ctx.category_file(Category::Hikvision8000),
        smartpss = ctx.category_file(Category::SmartPss3000),
        web = ctx.category_file(Category::Web80),
        camera = ctx.category_file(Category::Camera37777),
        cameras = port_list(CAMERA_PORTS),
    )
}

pub fn nesca_config(ctx: &TemplateContext) -> String {
    let ports = port_list(NESCA_PORTS);
    format!(
        "# NESCA config for Russia camera scan
# Generated: {generated}

# Main ports to scan
PORTS = {ports}

# Target file
TARGET_FILE = {combined}

# Recommended settings:
# - Use the HTTP module for ports 80,443,8000,8080
# - Use the RTSP module for port 554
# - Use banner grabbing for port 37777
# - Check port 3000 for SmartPSS

# NESCA command:
# nesca --file {combined} --ports {ports} --http --rtsp
",
        generated = ctx.generated,
        ports = ports,
        combined = ctx.combined_file,
    )
}

/// All templates as `(file name, content)` pairs.
pub fn render_all(ctx: &TemplateContext) -> Vec<(&'static str, String)> {
    vec![
        (MASSCAN_FILE, masscan_config(ctx)),
        (NMAP_FILE, nmap_commands(ctx)),
        (NESCA_FILE, nesca_config(ctx)),
    ]
}
