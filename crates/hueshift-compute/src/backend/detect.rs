//! Backend detection and auto-selection.

use super::Backend;

/// Information about a compute backend.
#[derive(Debug, Clone)]
pub struct BackendInfo {
    /// Backend type.
    pub backend: Backend,
    /// Human-readable name.
    pub name: &'static str,
    /// Whether backend is available.
    pub available: bool,
    /// Priority for auto-selection (higher = preferred).
    pub priority: u32,
    /// Description.
    pub description: &'static str,
}

/// Detect all compiled-in backends, most preferred first.
pub fn detect_backends() -> Vec<BackendInfo> {
    #[allow(unused_mut)]
    let mut backends = vec![
        BackendInfo {
            backend: Backend::Cpu,
            name: "CPU",
            available: true,
            priority: 10,
            description: if cfg!(feature = "parallel") {
                "CPU reference kernel, rayon parallel"
            } else {
                "CPU reference kernel, single thread"
            },
        },
    ];

    #[cfg(feature = "wgpu")]
    {
        let wgpu_available = super::WgpuBackend::is_available();
        backends.push(BackendInfo {
            backend: Backend::Wgpu,
            name: "wgpu",
            available: wgpu_available,
            priority: if wgpu_available { 100 } else { 0 },
            description: "GPU fragment shader via wgpu (Vulkan/Metal/DX12/GL)",
        });
    }

    backends.sort_by(|a, b| b.priority.cmp(&a.priority));
    backends
}

/// Select the best available backend.
pub fn select_best_backend() -> Backend {
    detect_backends()
        .into_iter()
        .filter(|b| b.available)
        .max_by_key(|b| b.priority)
        .map(|b| b.backend)
        .unwrap_or(Backend::Cpu)
}

/// One `[+]`/`[-]` line per backend.
pub fn describe_backends() -> String {
    detect_backends()
        .into_iter()
        .map(|info| {
            let status = if info.available { "+" } else { "-" };
            format!("[{}] {}: {}\n", status, info.name, info.description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_is_always_listed() {
        let backends = detect_backends();
        assert!(backends.iter().any(|b| b.backend == Backend::Cpu && b.available));
    }

    #[test]
    fn best_backend_is_available() {
        assert!(select_best_backend().is_available());
    }

    #[test]
    fn description_lines() {
        let desc = describe_backends();
        assert!(desc.lines().any(|l| l.starts_with("[+] CPU:")));
        assert_eq!(desc.lines().count(), detect_backends().len());
    }
}
