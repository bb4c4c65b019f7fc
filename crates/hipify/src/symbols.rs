//! Source-to-target name table.
//!
//! The table is filled once before any pass runs and only read afterwards.
//! Inserting a name twice keeps the later target; the built-in table relies
//! on that for its historical duplicate entries.

use log::debug;
use std::collections::HashMap;

/// Mapping from CUDA names to HIP names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    names: HashMap<String, String>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(source, target)` pairs in order
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut table = Self::new();
        for (source, target) in pairs {
            table.insert(source, target);
        }
        table
    }

    /// The CUDA runtime to HIP table
    pub fn cuda_to_hip() -> Self {
        Self::from_pairs(CUDA_TO_HIP.iter().copied())
    }

    /// Apply user mappings on top of this table
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (source, target) in overrides {
            debug!("Symbol override: {source} -> {target}");
            self.insert(source.as_str(), target.as_str());
        }
        self
    }

    /// Insert a mapping, replacing any earlier target for the same name
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.names.insert(source.into(), target.into());
    }

    /// Exact, case-sensitive lookup
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All mappings, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }
}

const CUDA_TO_HIP: &[(&str, &str)] = &[
    // Defines
    ("__CUDACC__", "__HIPCC__"),
    // Includes
    ("cuda_runtime.h", "hip_runtime.h"),
    ("cuda_runtime_api.h", "hip_runtime_api.h"),
    // Error codes and return types
    ("cudaError_t", "hipError_t"),
    ("cudaError", "hipError"),
    ("cudaSuccess", "hipSuccess"),
    ("cudaErrorUnknown", "hipErrorUnknown"),
    ("cudaErrorMemoryAllocation", "hipErrorMemoryAllocation"),
    ("cudaErrorMemoryFree", "hipErrorMemoryFree"),
    ("cudaErrorUnknownSymbol", "hipErrorUnknownSymbol"),
    ("cudaErrorOutOfResources", "hipErrorOutOfResources"),
    ("cudaErrorInvalidValue", "hipErrorInvalidValue"),
    ("cudaErrorInvalidResourceHandle", "hipErrorInvalidResourceHandle"),
    ("cudaErrorInvalidDevice", "hipErrorInvalidDevice"),
    ("cudaErrorNoDevice", "hipErrorNoDevice"),
    ("cudaErrorNotReady", "hipErrorNotReady"),
    ("cudaErrorUnknown", "hipErrorUnknown"),
    // Error APIs
    ("cudaGetLastError", "hipGetLastError"),
    ("cudaPeekAtLastError", "hipPeekAtLastError"),
    ("cudaGetErrorName", "hipGetErrorName"),
    ("cudaGetErrorString", "hipGetErrorString"),
    // Memcpy
    ("cudaMemcpy", "hipMemcpy"),
    ("cudaMemcpyHostToHost", "hipMemcpyHostToHost"),
    ("cudaMemcpyHostToDevice", "hipMemcpyHostToDevice"),
    ("cudaMemcpyDeviceToHost", "hipMemcpyDeviceToHost"),
    ("cudaMemcpyDeviceToDevice", "hipMemcpyDeviceToDevice"),
    ("cudaMemcpyDefault", "hipMemcpyDefault"),
    ("cudaMemcpyToSymbol", "hipMemcpyToSymbol"),
    ("cudaMemset", "hipMemset"),
    ("cudaMemsetAsync", "hipMemsetAsync"),
    ("cudaMemcpyAsync", "hipMemcpyAsync"),
    ("cudaMemGetInfo", "hipMemGetInfo"),
    ("cudaMemcpyKind", "hipMemcpyKind"),
    // Memory management
    ("cudaMalloc", "hipMalloc"),
    ("cudaMallocHost", "hipMallocHost"),
    ("cudaFree", "hipFree"),
    ("cudaFreeHost", "hipFreeHost"),
    // Coordinate indexing and dimensions
    ("threadIdx.x", "hipThreadIdx_x"),
    ("threadIdx.y", "hipThreadIdx_y"),
    ("threadIdx.z", "hipThreadIdx_z"),
    ("blockIdx.x", "hipBlockIdx_x"),
    ("blockIdx.y", "hipBlockIdx_y"),
    ("blockIdx.z", "hipBlockIdx_z"),
    ("blockDim.x", "hipBlockDim_x"),
    ("blockDim.y", "hipBlockDim_y"),
    ("blockDim.z", "hipBlockDim_z"),
    ("gridDim.x", "hipGridDim_x"),
    ("gridDim.y", "hipGridDim_y"),
    ("gridDim.z", "hipGridDim_z"),
    ("blockIdx.x", "hipBlockIdx_x"),
    ("blockIdx.y", "hipBlockIdx_y"),
    ("blockIdx.z", "hipBlockIdx_z"),
    ("blockDim.x", "hipBlockDim_x"),
    ("blockDim.y", "hipBlockDim_y"),
    ("blockDim.z", "hipBlockDim_z"),
    ("gridDim.x", "hipGridDim_x"),
    ("gridDim.y", "hipGridDim_y"),
    ("gridDim.z", "hipGridDim_z"),
    ("warpSize", "hipWarpSize"),
    // Events
    ("cudaEvent_t", "hipEvent_t"),
    ("cudaEventCreate", "hipEventCreate"),
    ("cudaEventCreateWithFlags", "hipEventCreateWithFlags"),
    ("cudaEventDestroy", "hipEventDestroy"),
    ("cudaEventRecord", "hipEventRecord"),
    ("cudaEventElapsedTime", "hipEventElapsedTime"),
    ("cudaEventSynchronize", "hipEventSynchronize"),
    // Streams
    ("cudaStream_t", "hipStream_t"),
    ("cudaStreamCreate", "hipStreamCreate"),
    ("cudaStreamCreateWithFlags", "hipStreamCreateWithFlags"),
    ("cudaStreamDestroy", "hipStreamDestroy"),
    ("cudaStreamWaitEvent", "hipStreamWaitEven"),
    ("cudaStreamSynchronize", "hipStreamSynchronize"),
    ("cudaStreamDefault", "hipStreamDefault"),
    ("cudaStreamNonBlocking", "hipStreamNonBlocking"),
    // Other synchronization
    ("cudaDeviceSynchronize", "hipDeviceSynchronize"),
    // deprecated
    ("cudaThreadSynchronize", "hipDeviceSynchronize"),
    ("cudaDeviceReset", "hipDeviceReset"),
    // deprecated
    ("cudaThreadExit", "hipDeviceReset"),
    ("cudaSetDevice", "hipSetDevice"),
    ("cudaGetDevice", "hipGetDevice"),
    // Device
    ("cudaDeviceProp", "hipDeviceProp_t"),
    ("cudaGetDeviceProperties", "hipDeviceGetProperties"),
    // Cache config
    ("cudaDeviceSetCacheConfig", "hipDeviceSetCacheConfig"),
    ("cudaThreadSetCacheConfig", "hipDeviceSetCacheConfig"),
    ("cudaDeviceGetCacheConfig", "hipDeviceGetCacheConfig"),
    ("cudaThreadGetCacheConfig", "hipDeviceGetCacheConfig"),
    ("cudaFuncCache", "hipFuncCache"),
    ("cudaFuncCachePreferNone", "hipFuncCachePreferNone"),
    ("cudaFuncCachePreferShared", "hipFuncCachePreferShared"),
    ("cudaFuncCachePreferL1", "hipFuncCachePreferL1"),
    ("cudaFuncCachePreferEqual", "hipFuncCachePreferEqual"),
    ("cudaFuncSetCacheConfig", "hipFuncSetCacheConfig"),
    ("cudaDriverGetVersion", "hipDriverGetVersion"),
    // Peer2Peer
    ("cudaDeviceCanAccessPeer", "hipDeviceCanAccessPeer"),
    ("cudaDeviceDisablePeerAccess", "hipDeviceDisablePeerAccess"),
    ("cudaDeviceEnablePeerAccess", "hipDeviceEnablePeerAccess"),
    ("cudaMemcpyPeerAsync", "hipMemcpyPeerAsync"),
    ("cudaMemcpyPeer", "hipMemcpyPeer"),
    // Shared mem
    ("cudaDeviceSetSharedMemConfig", "hipDeviceSetSharedMemConfig"),
    ("cudaThreadSetSharedMemConfig", "hipDeviceSetSharedMemConfig"),
    ("cudaDeviceGetSharedMemConfig", "hipDeviceGetSharedMemConfig"),
    ("cudaThreadGetSharedMemConfig", "hipDeviceGetSharedMemConfig"),
    ("cudaSharedMemConfig", "hipSharedMemConfig"),
    ("cudaSharedMemBankSizeDefault", "hipSharedMemBankSizeDefault"),
    ("cudaSharedMemBankSizeFourByte", "hipSharedMemBankSizeFourByte"),
    ("cudaSharedMemBankSizeEightByte", "hipSharedMemBankSizeEightByte"),
    ("cudaGetDeviceCount", "hipGetDeviceCount"),
    // Profiler
    ("cudaProfilerStart", "hipProfilerStart"),
    ("cudaProfilerStop", "hipProfilerStop"),
    // Textures
    ("cudaChannelFormatDesc", "hipChannelFormatDesc"),
    ("cudaFilterModePoint", "hipFilterModePoint"),
    ("cudaReadModeElementType", "hipReadModeElementType"),
    ("cudaCreateChannelDesc", "hipCreateChannelDesc"),
    ("cudaBindTexture", "hipBindTexture"),
    ("cudaUnbindTexture", "hipUnbindTexture"),
];
