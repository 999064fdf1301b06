//! Embedded files encryption support for PDF
//!
//! This module implements encryption control for embedded files and metadata
//! according to ISO 32000-1:2008 §7.6.5.

use crate::encryption::{CryptFilterManager, EncryptionKey};
use crate::error::Result;
use crate::objects::{Dictionary, Object, ObjectId};
use std::sync::Arc;

/// Embedded file encryption handler
pub struct EmbeddedFileEncryption {
    /// Filter name for embedded files (EFF)
    eff_filter: Option<String>,
    /// Whether to encrypt metadata
    encrypt_metadata: bool,
    /// Crypt filter manager
    filter_manager: Arc<CryptFilterManager>,
}

impl EmbeddedFileEncryption {
    /// Create new embedded file encryption handler
    pub fn new(
        eff_filter: Option<String>,
        encrypt_metadata: bool,
        filter_manager: Arc<CryptFilterManager>,
    ) -> Self {
        Self {
            eff_filter,
            encrypt_metadata,
            filter_manager,
        }
    }

    /// Check if a stream is an embedded file
    pub fn is_embedded_file(stream_dict: &Dictionary) -> bool {
        if let Some(Object::Name(type_name)) = stream_dict.get("Type") {
            type_name == "EmbeddedFile"
        } else {
            false
        }
    }

    /// Check if a stream is metadata
    pub fn is_metadata(stream_dict: &Dictionary) -> bool {
        if let Some(Object::Name(type_name)) = stream_dict.get("Type") {
            type_name == "Metadata"
        } else if let Some(Object::Name(subtype)) = stream_dict.get("Subtype") {
            subtype == "XML" && stream_dict.contains_key("Metadata")
        } else {
            false
        }
    }

    /// Get the appropriate filter for a stream
    pub fn get_stream_filter(&self, stream_dict: &Dictionary) -> Option<String> {
        if Self::is_embedded_file(stream_dict) {
            // Use EFF filter if configured
            self.eff_filter.clone()
        } else if Self::is_metadata(stream_dict) && !self.encrypt_metadata {
            // Don't encrypt metadata if flag is false
            Some("Identity".to_string())
        } else {
            // Use default stream filter
            None
        }
    }

    /// Encrypt embedded file data
    pub fn encrypt_embedded_file(
        &self,
        data: &[u8],
        obj_id: &ObjectId,
        encryption_key: &EncryptionKey,
    ) -> Result<Vec<u8>> {
        if let Some(ref _filter_name) = self.eff_filter {
            self.filter_manager.encrypt_stream(
                data,
                obj_id,
                &Dictionary::new(), // Empty dict for embedded files
                encryption_key,
            )
        } else {
            // No EFF filter configured, return data as-is
            Ok(data.to_vec())
        }
    }

    /// Decrypt embedded file data
    pub fn decrypt_embedded_file(
        &self,
        data: &[u8],
        obj_id: &ObjectId,
        encryption_key: &EncryptionKey,
    ) -> Result<Vec<u8>> {
        if let Some(ref _filter_name) = self.eff_filter {
            self.filter_manager.decrypt_stream(
                data,
                obj_id,
                &Dictionary::new(), // Empty dict for embedded files
                encryption_key,
            )
        } else {
            // No EFF filter configured, return data as-is
            Ok(data.to_vec())
        }
    }

    /// Process a stream for encryption, considering embedded files and metadata
    pub fn process_stream_encryption(
        &self,
        stream_dict: &Dictionary,
        data: &[u8],
        obj_id: &ObjectId,
        encryption_key: &EncryptionKey,
        encrypt: bool,
    ) -> Result<Vec<u8>> {
        // Check if this is an embedded file
        if Self::is_embedded_file(stream_dict) {
            if encrypt {
                self.encrypt_embedded_file(data, obj_id, encryption_key)
            } else {
                self.decrypt_embedded_file(data, obj_id, encryption_key)
            }
        } else if Self::is_metadata(stream_dict) && !self.encrypt_metadata {
            // Don't encrypt/decrypt metadata if flag is false
            Ok(data.to_vec())
        } else {
            // Use standard stream encryption
            if encrypt {
                self.filter_manager
                    .encrypt_stream(data, obj_id, stream_dict, encryption_key)
            } else {
                self.filter_manager
                    .decrypt_stream(data, obj_id, stream_dict, encryption_key)
            }
        }
    }
}

/// Extended encryption dictionary with EFF support
pub struct ExtendedEncryptionDict {
    /// Base encryption dictionary fields
    pub base: crate::encryption::EncryptionDictionary,
    /// Embedded files filter (EFF)
    pub eff: Option<String>,
}

impl ExtendedEncryptionDict {
    /// Create from base dictionary with EFF
    pub fn new(base: crate::encryption::EncryptionDictionary, eff: Option<String>) -> Self {
        Self { base, eff }
    }

    /// Convert to PDF dictionary with EFF field
    pub fn to_dict(&self) -> Dictionary {
        let mut dict = self.base.to_dict();

        // Add EFF field if present
        if let Some(ref eff) = self.eff {
            dict.set("EFF", Object::Name(eff.clone()));
        }

        dict
    }
}
