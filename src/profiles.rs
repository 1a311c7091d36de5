//! Static schema catalog: one profile per log-source view.
//!
//! Event-ID tables are per-source configuration carried over from the
//! script family this tool consolidates. Where sibling views disagreed on
//! what a duplicate numeric ID means, each view keeps its own table.

use crate::record::HeaderField;
use crate::schema::{CellSpec, ChannelArm, ColumnSpec, Schema};

/// Log-source view selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Profile {
    /// Account logon events from Security.evtx
    Logins,
    /// Process and object-access events from Security.evtx
    Processes,
    /// Account change events from Security.evtx
    AccountChanges,
    /// Scheduled-task events from the TaskScheduler operational log
    Tasks,
    /// BITS transfer events from the Bits-Client operational log
    Bits,
    /// RDP connection events across the four terminal-services logs
    Rdp,
}

impl Profile {
    pub fn schema(&self) -> &'static Schema {
        match self {
            Profile::Logins => &LOGINS,
            Profile::Processes => &PROCESSES,
            Profile::AccountChanges => &ACCOUNT_CHANGES,
            Profile::Tasks => &TASKS,
            Profile::Bits => &BITS,
            Profile::Rdp => &RDP,
        }
    }
}

/// Column layout shared by the Security.evtx views (the logins,
/// account-changes and processes programs all used the same EventData
/// names, the processes view adding five of its own at the end).
static SECURITY_HEADER: [&str; 24] = [
    "Date",
    "EventID",
    "Description",
    "Computer",
    "LogonType",
    "AuthenticationPackageName",
    "LmPackageName",
    "LogonProcessName",
    "IpAddress",
    "IpPort",
    "WorkstationName",
    "SubjectUserSid",
    "SubjectUserName",
    "SubjectDomainName",
    "SubjectLogonId",
    "TargetUserSid",
    "TargetUserName",
    "TargetDomainName",
    "TargetLogonId",
    "LogonGuid",
    "TransmittedServices",
    "KeyLength",
    "ProcessName",
    "ProcessId",
];

static SECURITY_COLUMNS: [ColumnSpec; 24] = [
    ColumnSpec::Timestamp,
    ColumnSpec::EventId,
    ColumnSpec::Description,
    ColumnSpec::Header(HeaderField::Computer),
    ColumnSpec::Field(&["LogonType"]),
    ColumnSpec::Field(&["AuthenticationPackageName"]),
    ColumnSpec::Field(&["LmPackageName"]),
    ColumnSpec::Field(&["LogonProcessName"]),
    ColumnSpec::Field(&["IpAddress"]),
    ColumnSpec::Field(&["IpPort"]),
    ColumnSpec::Field(&["WorkstationName"]),
    ColumnSpec::Field(&["SubjectUserSid"]),
    ColumnSpec::Field(&["SubjectUserName"]),
    ColumnSpec::Field(&["SubjectDomainName"]),
    ColumnSpec::Field(&["SubjectLogonId"]),
    ColumnSpec::Field(&["TargetUserSid"]),
    ColumnSpec::Field(&["TargetUserName"]),
    ColumnSpec::Field(&["TargetDomainName"]),
    ColumnSpec::Field(&["TargetLogonId"]),
    ColumnSpec::Field(&["LogonGuid"]),
    ColumnSpec::Field(&["TransmittedServices"]),
    ColumnSpec::Field(&["KeyLength"]),
    ColumnSpec::Field(&["ProcessName"]),
    ColumnSpec::Field(&["ProcessId"]),
];

pub static LOGINS: Schema = Schema {
    name: "logins",
    header: &SECURITY_HEADER,
    catalog: &[
        (1102, "Log Cleared"),
        (4624, "User logon"),
        (4625, "Login Failed"),
        (4634, "Logoff"),
        (4647, "User Initiated logoff"),
        (4648, "Attempted Login by a process"),
        (4672, "Administrator Logon"),
        (4740, "Account Locked out"),
        (4776, "NTLM Credential Auth"),
        (4778, "Reconnect(RDP or FastUser Switch)"),
        (4770, "Kerberos Ticket Renewed"),
        (4771, "Kerberos pre-auth failed"),
        (4768, "Kerberos TGT Requested"),
        (4769, "Kerberos service ticket requested"),
        (4779, "Disconnect(RDP or FastUser Switch)"),
    ],
    columns: &SECURITY_COLUMNS,
    log_files: &["Security.evtx"],
};

static PROCESSES_HEADER: [&str; 29] = [
    "Date",
    "EventID",
    "Description",
    "Computer",
    "LogonType",
    "AuthenticationPackageName",
    "LmPackageName",
    "LogonProcessName",
    "IpAddress",
    "IpPort",
    "WorkstationName",
    "SubjectUserSid",
    "SubjectUserName",
    "SubjectDomainName",
    "SubjectLogonId",
    "TargetUserSid",
    "TargetUserName",
    "TargetDomainName",
    "TargetLogonId",
    "LogonGuid",
    "TransmittedServices",
    "KeyLength",
    "ProcessName",
    "ProcessId",
    "NewProcessId",
    "NewProcessName",
    "ParentProcessName",
    "CommandLine",
    "TokenElevationType",
];

static PROCESSES_COLUMNS: [ColumnSpec; 29] = [
    ColumnSpec::Timestamp,
    ColumnSpec::EventId,
    ColumnSpec::Description,
    ColumnSpec::Header(HeaderField::Computer),
    ColumnSpec::Field(&["LogonType"]),
    ColumnSpec::Field(&["AuthenticationPackageName"]),
    ColumnSpec::Field(&["LmPackageName"]),
    ColumnSpec::Field(&["LogonProcessName"]),
    ColumnSpec::Field(&["IpAddress"]),
    ColumnSpec::Field(&["IpPort"]),
    ColumnSpec::Field(&["WorkstationName"]),
    ColumnSpec::Field(&["SubjectUserSid"]),
    ColumnSpec::Field(&["SubjectUserName"]),
    ColumnSpec::Field(&["SubjectDomainName"]),
    ColumnSpec::Field(&["SubjectLogonId"]),
    ColumnSpec::Field(&["TargetUserSid"]),
    ColumnSpec::Field(&["TargetUserName"]),
    ColumnSpec::Field(&["TargetDomainName"]),
    ColumnSpec::Field(&["TargetLogonId"]),
    ColumnSpec::Field(&["LogonGuid"]),
    ColumnSpec::Field(&["TransmittedServices"]),
    ColumnSpec::Field(&["KeyLength"]),
    ColumnSpec::Field(&["ProcessName"]),
    ColumnSpec::Field(&["ProcessId"]),
    ColumnSpec::Field(&["NewProcessId"]),
    ColumnSpec::Field(&["NewProcessName"]),
    ColumnSpec::Field(&["ParentProcessName"]),
    ColumnSpec::Field(&["CommandLine"]),
    ColumnSpec::Field(&["TokenElevationType"]),
];

pub static PROCESSES: Schema = Schema {
    name: "processes",
    header: &PROCESSES_HEADER,
    catalog: &[
        (1102, "Log Cleared"),
        (4688, "Process Created"),
        (4689, "Process Exited"),
        (4690, "Attempt to Duplicate Object Handle"),
        (4656, "Request to Access to Object Handle"),
        (4658, "Access to a File or object closed"),
        (4661, "Handle to an Object was Requested"),
        (4662, "Operation was performed on an Object"),
        (4663, "Attempted Access a File or Object"),
        (4670, "Permission to File or Object Changed"),
        (4673, "Attempted Access of Privileged Service"),
        (4674, "Operation attempted on a privileged service"),
        (4697, "New Service has been Installed"),
        (4782, "Account Password Hash was Accessed"),
        (5140, "Network Share Accessed"),
        (5156, "Program Connected to another process"),
        (5158, "Filter allowed bind to local port"),
    ],
    columns: &PROCESSES_COLUMNS,
    log_files: &["Security.evtx"],
};

pub static ACCOUNT_CHANGES: Schema = Schema {
    name: "account-changes",
    header: &SECURITY_HEADER,
    catalog: &[
        (1102, "Log Cleared"),
        (4704, "A User Right was Assigned"),
        (4705, "A User Right was Removed"),
        (4720, "A New User Account Created"),
        (4722, "A New User Account Enabled"),
        (4725, "User Account Disabled"),
        (4726, "User Account Deleted"),
        (4728, "Member Added to Global Group"),
        (4731, "A Security-enabled Group Created"),
        (4732, "A Member was Added to Security-enabled Local Group"),
        (4733, "An Account was removed from Local Security-enabled Group"),
        (4734, "A Security-enabled Local Group was Deleted"),
        (4740, "Account Locked out"),
        (4748, "Local Group Deleted"),
        (4756, "Member Added to Universal Group"),
        (4765, "SID History added to Account"),
        (4766, "SID History add attempted on Account"),
        (4767, "User Account Unlocked"),
        (4781, "Account Name Changed"),
        (4793, "Password Policy Checking API called"),
        (4794, "Attempted Admin Password Change! Directory Services Restore Mode(DSRM)"),
        (4799, "A security-enabled local group membership was enumerated"),
    ],
    columns: &SECURITY_COLUMNS,
    log_files: &["Security.evtx"],
};

// The task views deliberately emit every record (empty catalog): task
// activity is sparse enough that analysts triage the full log.
pub static TASKS: Schema = Schema {
    name: "tasks",
    header: &[
        "Date",
        "EventID",
        "EventDataName",
        "ProcessID",
        "ThreadID",
        "Keywords",
        "ActionName",
        "TaskName",
        "UserName",
        "UserContext",
        "Command",
        "Path",
        "Priority",
        "ResultCode",
        "TaskInstanceId",
        "TaskProcessID",
        "CurrentQuota",
        "ErrorDescription",
    ],
    catalog: &[],
    columns: &[
        ColumnSpec::Timestamp,
        ColumnSpec::EventId,
        ColumnSpec::Field(&["EventDataName"]),
        ColumnSpec::Header(HeaderField::ProcessId),
        ColumnSpec::Header(HeaderField::ThreadId),
        ColumnSpec::Header(HeaderField::Keywords),
        ColumnSpec::Field(&["ActionName"]),
        ColumnSpec::Field(&["TaskName"]),
        ColumnSpec::Field(&["UserName"]),
        ColumnSpec::Field(&["UserContext"]),
        ColumnSpec::Field(&["Command"]),
        ColumnSpec::Field(&["Path"]),
        ColumnSpec::Field(&["Priority"]),
        ColumnSpec::Field(&["ResultCode"]),
        ColumnSpec::Field(&["TaskInstanceId"]),
        ColumnSpec::Field(&["ProcessID"]),
        ColumnSpec::Field(&["CurrentQuota"]),
        ColumnSpec::Field(&["ErrorDescription"]),
    ],
    log_files: &["Microsoft-Windows-TaskScheduler%4Operational.evtx"],
};

pub static BITS: Schema = Schema {
    name: "bits",
    header: &[
        "Date",
        "EventID",
        "Description",
        "Computer",
        "ProcessID",
        "ThreadID",
        "Name",
        "User",
        "jobTitle",
        "URL",
        "fileTime",
        "fileLength",
        "bytesTotal",
        "bytesTransferred",
        "bytesTransferredFromPeer",
        "jobId",
        "jobOwner",
        "fileCount",
        "String",
        "String1",
    ],
    catalog: &[
        (3, "Bits Service Created a new job"),
        (4, "Bits job completed"),
        (5, "Bits job cancelled"),
        (59, "Bits transfer initiated"),
        (60, "Bits transfer terminated"),
    ],
    columns: &[
        ColumnSpec::Timestamp,
        ColumnSpec::EventId,
        ColumnSpec::Description,
        ColumnSpec::Header(HeaderField::Computer),
        ColumnSpec::Header(HeaderField::ProcessId),
        ColumnSpec::Header(HeaderField::ThreadId),
        ColumnSpec::Field(&["Name"]),
        ColumnSpec::Field(&["User"]),
        ColumnSpec::Field(&["jobTitle"]),
        ColumnSpec::Field(&["url"]),
        ColumnSpec::Field(&["fileTime"]),
        ColumnSpec::Field(&["fileLength"]),
        ColumnSpec::Field(&["bytesTotal"]),
        ColumnSpec::Field(&["bytesTransferred"]),
        ColumnSpec::Field(&["bytesTransferredFromPeer"]),
        ColumnSpec::Field(&["jobId"]),
        ColumnSpec::Field(&["jobOwner"]),
        ColumnSpec::Field(&["fileCount"]),
        ColumnSpec::Field(&["String"]),
        ColumnSpec::Field(&["String1"]),
    ],
    log_files: &["Microsoft-Windows-Bits-Client%4Operational.evtx"],
};

const TS_LOCAL: &str = "Microsoft-Windows-TerminalServices-LocalSessionManager/Operational";
const TS_REMOTE: &str = "Microsoft-Windows-TerminalServices-RemoteConnectionManager/Operational";
const TS_CORE: &str = "Microsoft-Windows-RemoteDesktopServices-RdpCoreTS/Operational";
const TS_CLIENT: &str = "Microsoft-Windows-TerminalServices-RDPClient/Operational";

// The same logical attributes come under different names on each of the
// four RDP channels, so the Domain/User/Host/Session/Direction group
// dispatches on the Channel header.
pub static RDP: Schema = Schema {
    name: "rdp",
    header: &[
        "Date",
        "Channel",
        "RecordID",
        "Computer",
        "EventID",
        "Description",
        "Domain",
        "User",
        "Host/IP Address",
        "Session",
        "Direction",
    ],
    catalog: &[
        (21, "RDP Session logon success"),
        (22, "RDP Shell start notification received"),
        (23, "RDP Session logoff"),
        (24, "RDP Session has been disconnected"),
        (25, "RDP Session reconnection success"),
        (39, "RDP Session <X> disconnected by session <Y>"),
        (40, "RDP Session <X> disconnected reason code <Z>"),
        (1149, "RDP Login screen accessed"),
        (1006, "Large Number of Connection Attempts"),
        (98, "RDP Successful Connection"),
        (131, "RDP accepted a new TCP connection"),
        (140, "RDP connection Failed IP x.x.x.x incorect password"),
        (1024, "RDP is trying to connect to another host"),
        (1102, "Client initiated an outbound RDP connection"),
        (1026, "RDP client has been disconnected"),
        (1029, "Base64(sha256(UserName))"),
        (1105, "Multi-transport connection disconnected"),
    ],
    columns: &[
        ColumnSpec::Timestamp,
        ColumnSpec::Header(HeaderField::Channel),
        ColumnSpec::Header(HeaderField::RecordId),
        ColumnSpec::Header(HeaderField::Computer),
        ColumnSpec::EventId,
        ColumnSpec::Description,
        ColumnSpec::Channel {
            width: 5,
            arms: &[
                ChannelArm {
                    channel: TS_LOCAL,
                    cells: &[
                        CellSpec::Literal(""),
                        CellSpec::Field(&["User"]),
                        CellSpec::Field(&["Address"]),
                        CellSpec::Field(&["SessionID"]),
                        CellSpec::Literal("RDP<-in"),
                    ],
                },
                ChannelArm {
                    channel: TS_REMOTE,
                    cells: &[
                        CellSpec::Field(&["Param2"]),
                        CellSpec::Field(&["Param1"]),
                        CellSpec::Field(&["Param3"]),
                        CellSpec::Literal(""),
                        CellSpec::Literal("RDP<-in"),
                    ],
                },
                ChannelArm {
                    channel: TS_CORE,
                    cells: &[
                        CellSpec::Literal(""),
                        CellSpec::Literal(""),
                        CellSpec::Field(&["ClientIP"]),
                        CellSpec::Field(&["ConnType"]),
                        CellSpec::Literal("RDP<-in"),
                    ],
                },
                ChannelArm {
                    channel: TS_CLIENT,
                    cells: &[
                        CellSpec::Literal(""),
                        CellSpec::Literal(""),
                        CellSpec::Field(&["ServerName", "Server Name", "Value"]),
                        CellSpec::Literal(""),
                        CellSpec::Literal("RDP->out"),
                    ],
                },
            ],
        },
    ],
    log_files: &[
        "Microsoft-Windows-TerminalServices-LocalSessionManager%4Operational.evtx",
        "Microsoft-Windows-TerminalServices-RemoteConnectionManager%4Operational.evtx",
        "Microsoft-Windows-RemoteDesktopServices-RdpCoreTS%4Operational.evtx",
        "Microsoft-Windows-TerminalServices-RDPClient%4Operational.evtx",
    ],
};
