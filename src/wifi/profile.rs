use crate::error::{StoreError, StoreResult};
use crate::remediation::ProfileStore;
use crate::wifi::types::{CallerUid, MacRandomization, NetworkId, NetworkProfile, SecurityType};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

const PROFILE_NS_V1: &str = "http://www.microsoft.com/networking/WLAN/profile/v1";
const PROFILE_NS_V3: &str = "http://www.microsoft.com/networking/WLAN/profile/v3";

/// Saved profiles kept in a single WLAN-profile style XML document.
///
/// Every mutation is written through to disk before returning.
#[derive(Debug)]
pub struct XmlProfileStore {
    path: PathBuf,
    profiles: Mutex<BTreeMap<NetworkId, NetworkProfile>>,
}

impl XmlProfileStore {
    /// Load the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let profiles = match std::fs::read_to_string(&path) {
            Ok(xml) => parse_profiles(&xml)?
                .into_iter()
                .map(|p| (p.network_id, p))
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), count = profiles.len(), "loaded profiles");
        Ok(Self {
            path,
            profiles: Mutex::new(profiles),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save a new profile, assigning the next free id
    pub fn add(&self, mut profile: NetworkProfile) -> StoreResult<NetworkId> {
        let mut profiles = self.lock();
        let network_id = match profiles.keys().next_back() {
            None => 0,
            Some(last) => last.checked_add(1).ok_or_else(|| StoreError::Rejected {
                network_id: *last,
                reason: "no free network id".to_string(),
            })?,
        };
        profile.network_id = network_id;
        let mut next = profiles.clone();
        next.insert(network_id, profile);
        self.commit(&mut profiles, next)?;
        Ok(network_id)
    }

    /// Snapshot of every saved profile, ordered by id
    pub fn list(&self) -> Vec<NetworkProfile> {
        self.lock().values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<NetworkId, NetworkProfile>> {
        self.profiles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write `next` to disk and only then make it the live state
    fn commit(
        &self,
        live: &mut BTreeMap<NetworkId, NetworkProfile>,
        next: BTreeMap<NetworkId, NetworkProfile>,
    ) -> StoreResult<()> {
        self.persist(&next)?;
        *live = next;
        Ok(())
    }

    fn persist(&self, profiles: &BTreeMap<NetworkId, NetworkProfile>) -> StoreResult<()> {
        let xml = create_profiles_xml(profiles.values())?;
        let tmp = self.path.with_extension("xml.tmp");
        std::fs::write(&tmp, xml)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ProfileStore for XmlProfileStore {
    fn get(&self, network_id: NetworkId) -> Option<NetworkProfile> {
        self.lock().get(&network_id).cloned()
    }

    fn update(&self, profile: &NetworkProfile, caller: CallerUid) -> StoreResult<()> {
        if profile.ssid.is_empty() {
            return Err(StoreError::Rejected {
                network_id: profile.network_id,
                reason: "empty SSID".to_string(),
            });
        }
        let mut profiles = self.lock();
        if !profiles.contains_key(&profile.network_id) {
            return Err(StoreError::UnknownProfile {
                network_id: profile.network_id,
            });
        }
        let mut next = profiles.clone();
        next.insert(profile.network_id, profile.clone());
        self.commit(&mut profiles, next)?;
        tracing::debug!(network_id = profile.network_id, uid = caller.0, "profile updated");
        Ok(())
    }

    fn enable(&self, network_id: NetworkId, caller: CallerUid) -> StoreResult<()> {
        let mut profiles = self.lock();
        let mut next = profiles.clone();
        let Some(profile) = next.get_mut(&network_id) else {
            return Err(StoreError::UnknownProfile { network_id });
        };
        profile.enabled = true;
        self.commit(&mut profiles, next)?;
        tracing::debug!(network_id, uid = caller.0, "profile enabled");
        Ok(())
    }
}

/// Create the XML document for a set of profiles
pub fn create_profiles_xml<'a>(
    profiles: impl IntoIterator<Item = &'a NetworkProfile>,
) -> StoreResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("WLANProfiles")))?;
    for profile in profiles {
        write_profile(&mut writer, profile)?;
    }
    writer.write_event(Event::End(BytesEnd::new("WLANProfiles")))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| StoreError::ProfileXmlInvalid(e.to_string()))
}

fn write_profile<W: std::io::Write>(
    writer: &mut Writer<W>,
    profile: &NetworkProfile,
) -> StoreResult<()> {
    let mut wlan_profile = BytesStart::new("WLANProfile");
    wlan_profile.push_attribute(("xmlns", PROFILE_NS_V1));
    writer.write_event(Event::Start(wlan_profile))?;

    write_element(writer, "name", &profile.ssid)?;
    write_element(writer, "networkId", &profile.network_id.to_string())?;

    writer.write_event(Event::Start(BytesStart::new("SSIDConfig")))?;
    writer.write_event(Event::Start(BytesStart::new("SSID")))?;
    write_element(writer, "name", &profile.ssid)?;
    writer.write_event(Event::End(BytesEnd::new("SSID")))?;
    if profile.hidden {
        write_element(writer, "nonBroadcast", "true")?;
    }
    writer.write_event(Event::End(BytesEnd::new("SSIDConfig")))?;

    write_element(writer, "connectionType", "ESS")?;
    let mode = if profile.enabled { "auto" } else { "manual" };
    write_element(writer, "connectionMode", mode)?;

    writer.write_event(Event::Start(BytesStart::new("MSM")))?;
    writer.write_event(Event::Start(BytesStart::new("security")))?;
    writer.write_event(Event::Start(BytesStart::new("authEncryption")))?;
    let (auth, cipher) = profile.security.auth_encryption();
    write_element(writer, "authentication", auth)?;
    write_element(writer, "encryption", cipher)?;
    let one_x = if profile.security == SecurityType::Enterprise {
        "true"
    } else {
        "false"
    };
    write_element(writer, "useOneX", one_x)?;
    writer.write_event(Event::End(BytesEnd::new("authEncryption")))?;

    if let Some(pwd) = &profile.passphrase {
        writer.write_event(Event::Start(BytesStart::new("sharedKey")))?;
        write_element(writer, "keyType", "passPhrase")?;
        write_element(writer, "protected", "false")?;
        write_element(writer, "keyMaterial", pwd.expose_secret())?;
        writer.write_event(Event::End(BytesEnd::new("sharedKey")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("security")))?;
    writer.write_event(Event::End(BytesEnd::new("MSM")))?;

    let mut mac = BytesStart::new("MacRandomization");
    mac.push_attribute(("xmlns", PROFILE_NS_V3));
    writer.write_event(Event::Start(mac))?;
    let randomized = match profile.mac_randomization {
        MacRandomization::Randomized => "true",
        MacRandomization::Disabled => "false",
    };
    write_element(writer, "enableRandomization", randomized)?;
    writer.write_event(Event::End(BytesEnd::new("MacRandomization")))?;

    writer.write_event(Event::End(BytesEnd::new("WLANProfile")))?;
    Ok(())
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> StoreResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Fields collected while walking one `<WLANProfile>` element
#[derive(Default)]
struct ProfileDraft {
    network_id: Option<NetworkId>,
    ssid: Option<String>,
    security: Option<SecurityType>,
    mac_randomization: MacRandomization,
    passphrase: Option<SecretString>,
    hidden: bool,
    enabled: bool,
}

impl ProfileDraft {
    fn apply(&mut self, parent: &str, leaf: &str, text: &str) -> StoreResult<()> {
        match (parent, leaf) {
            ("WLANProfile", "networkId") => {
                let id = text.parse().map_err(|_| {
                    StoreError::ProfileXmlInvalid(format!("bad networkId {text:?}"))
                })?;
                self.network_id = Some(id);
            }
            ("SSID", "name") => self.ssid = Some(text.to_string()),
            ("SSIDConfig", "nonBroadcast") => self.hidden = text == "true",
            ("WLANProfile", "connectionMode") => self.enabled = text == "auto",
            ("authEncryption", "authentication") => {
                let security = SecurityType::from_auth(text).ok_or_else(|| {
                    StoreError::ProfileXmlInvalid(format!("unknown authentication {text:?}"))
                })?;
                self.security = Some(security);
            }
            ("sharedKey", "keyMaterial") if !text.is_empty() => {
                self.passphrase = Some(SecretString::from(text.to_string()));
            }
            ("MacRandomization", "enableRandomization") => {
                self.mac_randomization = if text == "false" {
                    MacRandomization::Disabled
                } else {
                    MacRandomization::Randomized
                };
            }
            _ => {}
        }
        Ok(())
    }

    fn build(self) -> StoreResult<NetworkProfile> {
        let missing = |field: &str| StoreError::ProfileXmlInvalid(format!("missing {field}"));
        Ok(NetworkProfile {
            network_id: self.network_id.ok_or_else(|| missing("networkId"))?,
            ssid: self.ssid.ok_or_else(|| missing("SSID name"))?,
            security: self.security.ok_or_else(|| missing("authentication"))?,
            mac_randomization: self.mac_randomization,
            passphrase: self.passphrase,
            hidden: self.hidden,
            enabled: self.enabled,
        })
    }
}

/// Parse every `<WLANProfile>` in a document
pub fn parse_profiles(xml: &str) -> StoreResult<Vec<NetworkProfile>> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut draft: Option<ProfileDraft> = None;
    let mut profiles = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == "WLANProfile" {
                    draft = Some(ProfileDraft::default());
                }
                path.push(name);
                text.clear();
            }
            Event::Text(t) => {
                let decoded = t
                    .decode()
                    .map_err(|e| StoreError::ProfileXmlInvalid(e.to_string()))?;
                text.push_str(&decoded);
            }
            Event::GeneralRef(r) => {
                if let Some(ch) = r.resolve_char_ref()? {
                    text.push(ch);
                } else {
                    let name = r
                        .decode()
                        .map_err(|e| StoreError::ProfileXmlInvalid(e.to_string()))?;
                    let resolved = quick_xml::escape::resolve_predefined_entity(&name)
                        .ok_or_else(|| {
                            StoreError::ProfileXmlInvalid(format!("unknown entity &{name};"))
                        })?;
                    text.push_str(resolved);
                }
            }
            Event::End(_) => {
                let Some(leaf) = path.pop() else {
                    return Err(StoreError::ProfileXmlInvalid("unbalanced end tag".into()));
                };
                if leaf == "WLANProfile" {
                    if let Some(done) = draft.take() {
                        profiles.push(done.build()?);
                    }
                } else if let (Some(d), Some(parent)) = (draft.as_mut(), path.last()) {
                    d.apply(parent, &leaf, text.trim())?;
                }
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(profiles)
}
